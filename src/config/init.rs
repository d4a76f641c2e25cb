use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;

use super::{get_config_path, ReportConfig};

const HEADER: &str = "\
# simulado-report configuration
# Every key is optional; missing keys fall back to the values shown here.
# order: name-asc | name-desc | mean-asc | mean-desc (omit to keep sheet order)
";

/// Write the built-in defaults as YAML so they can be edited.
///
/// Writes to `path`, or the default config path when `None`. Refuses to
/// replace an existing file unless `force` is set. Returns the written path.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path().context("Could not determine home directory")?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&ReportConfig::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", config_path.display()))?;

    Ok(config_path)
}
