use std::path::PathBuf;

use thiserror::Error;

/// Every way a report run can fail.
///
/// Nothing in the pipeline recovers locally; the first error aborts the run
/// and is handed back to the caller with enough context (sheet, column, row)
/// to find the offending cell.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to load workbook {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error(
        "student names in sheet '{sheet}' do not match sheet '{reference_sheet}' \
         at row {row}: expected {}, found {}",
        display_slot(.expected),
        display_slot(.found)
    )]
    IdentityMismatch {
        sheet: String,
        reference_sheet: String,
        /// 1-based data row (the header row is not counted)
        row: usize,
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("cannot scale {subject}: item count is zero")]
    Division { subject: String },

    #[error("item range {start}..={end} is empty")]
    InvalidItemRange { start: u32, end: u32 },

    #[error("sheet '{sheet}', column '{column}', row {row}: '{value}' is not a number")]
    InvalidCell {
        sheet: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("invalid configuration: {}", .problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    #[error("failed to render report: {reason}")]
    Render { reason: String },

    #[error("failed to write report to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_slot(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{}'", v),
        None => "no row".to_string(),
    }
}

/// Coarse classification of a [`ReportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    MissingColumn,
    IdentityMismatch,
    Division,
    InvalidItemRange,
    InvalidCell,
    InvalidConfig,
    Render,
}

impl ErrorKind {
    /// Process exit code for the binary.
    ///
    /// 2 = environment (files), 3 = bad spreadsheet data, 4 = configuration bug.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Load | ErrorKind::Render => 2,
            ErrorKind::MissingColumn | ErrorKind::IdentityMismatch | ErrorKind::InvalidCell => 3,
            ErrorKind::Division | ErrorKind::InvalidItemRange | ErrorKind::InvalidConfig => 4,
        }
    }
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Load { .. } => ErrorKind::Load,
            ReportError::MissingColumn { .. } => ErrorKind::MissingColumn,
            ReportError::IdentityMismatch { .. } => ErrorKind::IdentityMismatch,
            ReportError::Division { .. } => ErrorKind::Division,
            ReportError::InvalidItemRange { .. } => ErrorKind::InvalidItemRange,
            ReportError::InvalidCell { .. } => ErrorKind::InvalidCell,
            ReportError::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            ReportError::Render { .. } | ReportError::Persist { .. } => ErrorKind::Render,
        }
    }

    pub(crate) fn render(reason: impl Into<String>) -> Self {
        ReportError::Render {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(problem: impl Into<String>) -> Self {
        ReportError::InvalidConfig {
            problems: vec![problem.into()],
        }
    }
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
