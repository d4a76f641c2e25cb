mod loader;
mod table;

pub use loader::load_tables;
pub use table::{CellValue, SourceTable};

use std::path::Path;

use tracing::info;

use crate::config::SheetConfig;
use crate::error::{ReportError, Result};
use crate::scoring::AnswerSheet;

/// The three tables of one exam sitting.
///
/// `first` and `second` hold item marks for two subjects each; `essay` holds
/// the essay score. All three list the same students in the same order once
/// [`crate::consistency::validate_tables`] has accepted them.
#[derive(Debug, Clone)]
pub struct ExamWorkbook {
    pub first: SourceTable,
    pub second: SourceTable,
    pub essay: SourceTable,
}

impl ExamWorkbook {
    pub fn answer_sheet(&self, sheet: AnswerSheet) -> &SourceTable {
        match sheet {
            AnswerSheet::First => &self.first,
            AnswerSheet::Second => &self.second,
        }
    }

    pub fn tables(&self) -> [&SourceTable; 3] {
        [&self.first, &self.second, &self.essay]
    }
}

/// Open `path` and read the three configured sheets.
pub fn load_workbook(path: &Path, sheets: &SheetConfig) -> Result<ExamWorkbook> {
    let names = [
        sheets.first.as_str(),
        sheets.second.as_str(),
        sheets.essay.as_str(),
    ];
    let mut tables = load_tables(path, &names)?.into_iter();

    let (Some(first), Some(second), Some(essay)) = (tables.next(), tables.next(), tables.next())
    else {
        return Err(ReportError::Load {
            path: path.to_path_buf(),
            reason: "workbook returned fewer sheets than requested".to_string(),
        });
    };

    info!(
        "Loaded {} ({} / {} / {} rows)",
        path.display(),
        first.row_count(),
        second.row_count(),
        essay.row_count()
    );

    Ok(ExamWorkbook {
        first,
        second,
        essay,
    })
}
