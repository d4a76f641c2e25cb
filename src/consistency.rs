//! Cross-sheet identity check.
//!
//! Scores are assembled by row position, not by joining on the name, so the
//! sheets must list exactly the same students in exactly the same order.

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::workbook::SourceTable;

/// Check that every identity column equals the first one, element for
/// element. Returns the canonical (first) sequence.
///
/// Each entry is `(sheet name, identities in row order)`. The first entry is
/// the reference; an empty slice yields an empty sequence.
pub fn validate(identity_columns: &[(&str, Vec<String>)]) -> Result<Vec<String>> {
    let Some(((reference_sheet, reference), rest)) = identity_columns.split_first() else {
        return Ok(Vec::new());
    };

    for (sheet, candidate) in rest {
        let rows = reference.len().max(candidate.len());
        for row in 0..rows {
            let expected = reference.get(row);
            let found = candidate.get(row);
            if expected != found {
                return Err(ReportError::IdentityMismatch {
                    sheet: sheet.to_string(),
                    reference_sheet: reference_sheet.to_string(),
                    row: row + 1,
                    expected: expected.cloned(),
                    found: found.cloned(),
                });
            }
        }
        debug!("Sheet '{}' matches '{}' ({} rows)", sheet, reference_sheet, rows);
    }

    Ok(reference.clone())
}

/// Read `identity_column` from every table and [`validate`] them.
///
/// Fails with [`ReportError::MissingColumn`] before comparing anything if
/// any table lacks the column.
pub fn validate_tables(tables: &[&SourceTable], identity_column: &str) -> Result<Vec<String>> {
    let columns = tables
        .iter()
        .map(|table| Ok((table.name(), table.text_column(identity_column)?)))
        .collect::<Result<Vec<_>>>()?;
    validate(&columns)
}
