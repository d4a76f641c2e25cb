use crate::error::{ReportError, Result};

/// A single spreadsheet cell, reduced to the shapes the report cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Numeric reading of a cell. Empty cells count as zero, booleans as 0/1
    /// and text is accepted when it parses as a finite number (decimal comma
    /// too).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => Some(0.0),
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                // "NaN" and "inf" parse as f64 but are not marks
                trimmed
                    .parse::<f64>()
                    .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
                    .ok()
                    .filter(|v| v.is_finite())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering used for identity cells. Whole numbers lose the `.0`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }
}

/// One named sheet: a header row and one row per student.
///
/// Read-only once loaded. Rows shorter than the header are padded with
/// [`CellValue::Empty`] when read.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Column position, or [`ReportError::MissingColumn`] naming this sheet.
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| ReportError::MissingColumn {
                sheet: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    /// All cells of a column rendered as trimmed text.
    pub fn text_column(&self, column: &str) -> Result<Vec<String>> {
        let idx = self.require_column(column)?;
        Ok((0..self.rows.len())
            .map(|row| self.cell(row, idx).as_text())
            .collect())
    }

    /// Numeric reading of one cell, failing with [`ReportError::InvalidCell`].
    pub fn number_at(&self, row: usize, column: usize) -> Result<f64> {
        let cell = self.cell(row, column);
        cell.as_number().ok_or_else(|| ReportError::InvalidCell {
            sheet: self.name.clone(),
            column: self.headers.get(column).cloned().unwrap_or_default(),
            row: row + 1,
            value: cell.as_text(),
        })
    }
}
