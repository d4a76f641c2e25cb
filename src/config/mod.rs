mod init;
mod schema;
mod validation;

pub use init::write_default_config;
pub use schema::{LayoutConfig, ReportConfig, SheetConfig};
pub use validation::validate_config;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ReportError, Result};

/// Get the config directory path (~/.config/simulado-report/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("simulado-report"))
}

/// Get the default config file path (~/.config/simulado-report/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration.
///
/// * `Some(path)` - the file must exist and parse.
/// * `None` - the default path is used when it exists, built-in defaults
///   otherwise.
///
/// # Errors
///
/// Returns [`ReportError::InvalidConfig`] if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<ReportConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ReportError::invalid_config(format!(
                    "config file not found at {}",
                    path.display()
                )));
            }
            read_config_file(&path)
        }
        None => match get_config_path().filter(|p| p.exists()) {
            Some(default_path) => read_config_file(&default_path),
            None => {
                debug!("No config file found, using built-in defaults");
                Ok(ReportConfig::default())
            }
        },
    }
}

fn read_config_file(path: &Path) -> Result<ReportConfig> {
    debug!("Reading config from {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| {
        ReportError::invalid_config(format!(
            "failed to read config file at {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_saphyr::from_str(&content).map_err(|e| {
        ReportError::invalid_config(format!("invalid YAML in {}: {}", path.display(), e))
    })
}
