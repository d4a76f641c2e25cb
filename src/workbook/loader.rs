use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use super::table::{CellValue, SourceTable};
use crate::error::{ReportError, Result};

/// Load the named sheets from a spreadsheet file.
///
/// The workbook handle is dropped before returning, on success and on error.
/// Row 0 of each sheet is the header row; rows with no content at all are
/// skipped.
pub fn load_tables(path: &Path, sheet_names: &[&str]) -> Result<Vec<SourceTable>> {
    let load_error = |reason: String| ReportError::Load {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(load_error("file not found".to_string()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(e.to_string()))?;
    let available = workbook.sheet_names().to_owned();

    let mut tables = Vec::with_capacity(sheet_names.len());
    for &sheet in sheet_names {
        if !available.iter().any(|s| s == sheet) {
            return Err(load_error(format!(
                "sheet '{}' not found (available: {})",
                sheet,
                available.join(", ")
            )));
        }

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| load_error(format!("sheet '{}': {}", sheet, e)))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(|c| convert_cell(c).as_text()).collect(),
            None => Vec::new(),
        };

        let body: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
            .filter(|row| !row.iter().all(CellValue::is_empty))
            .collect();

        debug!(
            "Loaded sheet '{}': {} columns, {} rows",
            sheet,
            headers.len(),
            body.len()
        );
        tables.push(SourceTable::new(sheet, headers, body));
    }

    Ok(tables)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}
