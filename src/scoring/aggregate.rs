use crate::error::{ReportError, Result};
use crate::workbook::SourceTable;

/// Column naming convention for item marks, e.g. `"Q {} Marks"`.
///
/// The single `{}` is replaced by the 1-based item index.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemColumns<'a> {
    pattern: &'a str,
}

impl<'a> ItemColumns<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern }
    }

    pub fn column_for(&self, index: u32) -> String {
        self.pattern.replacen("{}", &index.to_string(), 1)
    }
}

/// Sum each row's item marks over `item_start..=item_end`.
///
/// Returns one raw correct-answer count per row, in row order. Column order
/// in the sheet does not matter; every item column in the range must exist,
/// otherwise the first absent one is reported as
/// [`ReportError::MissingColumn`].
pub fn aggregate(
    table: &SourceTable,
    item_start: u32,
    item_end: u32,
    columns: &ItemColumns<'_>,
) -> Result<Vec<f64>> {
    if item_start > item_end {
        return Err(ReportError::InvalidItemRange {
            start: item_start,
            end: item_end,
        });
    }

    let indices = (item_start..=item_end)
        .map(|item| table.require_column(&columns.column_for(item)))
        .collect::<Result<Vec<usize>>>()?;

    (0..table.row_count())
        .map(|row| {
            indices
                .iter()
                .map(|&col| table.number_at(row, col))
                .sum::<Result<f64>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::CellValue;

    const PATTERN: &str = "Q {} Marks";

    fn table_with(headers: &[&str], rows: Vec<Vec<f64>>) -> SourceTable {
        let mut all_headers = vec!["Name".to_string()];
        all_headers.extend(headers.iter().map(|h| h.to_string()));
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, marks)| {
                let mut row = vec![CellValue::Text(format!("Aluno {}", i + 1))];
                row.extend(marks.into_iter().map(CellValue::Number));
                row
            })
            .collect();
        SourceTable::new("Planilha1", all_headers, rows)
    }

    #[test]
    fn test_column_for() {
        let columns = ItemColumns::new(PATTERN);
        assert_eq!(columns.column_for(1), "Q 1 Marks");
        assert_eq!(columns.column_for(90), "Q 90 Marks");
    }

    #[test]
    fn test_sums_inclusive_range() {
        let table = table_with(
            &["Q 1 Marks", "Q 2 Marks", "Q 3 Marks"],
            vec![vec![1.0, 1.0, 1.0], vec![0.0, 1.0, 0.0]],
        );
        let columns = ItemColumns::new(PATTERN);
        assert_eq!(aggregate(&table, 1, 3, &columns).unwrap(), vec![3.0, 1.0]);
        assert_eq!(aggregate(&table, 2, 3, &columns).unwrap(), vec![2.0, 1.0]);
        assert_eq!(aggregate(&table, 3, 3, &columns).unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_invariant_to_column_order() {
        let ordered = table_with(
            &["Q 1 Marks", "Q 2 Marks", "Q 3 Marks"],
            vec![vec![1.0, 0.0, 1.0]],
        );
        let shuffled = table_with(
            &["Q 3 Marks", "Q 1 Marks", "Q 2 Marks"],
            vec![vec![1.0, 1.0, 0.0]],
        );
        let columns = ItemColumns::new(PATTERN);
        assert_eq!(
            aggregate(&ordered, 1, 3, &columns).unwrap(),
            aggregate(&shuffled, 1, 3, &columns).unwrap()
        );
    }

    #[test]
    fn test_missing_item_column_fails() {
        let table = table_with(&["Q 1 Marks", "Q 3 Marks"], vec![vec![1.0, 1.0]]);
        let columns = ItemColumns::new(PATTERN);
        let err = aggregate(&table, 1, 3, &columns).unwrap_err();
        match err {
            ReportError::MissingColumn { sheet, column } => {
                assert_eq!(sheet, "Planilha1");
                assert_eq!(column, "Q 2 Marks");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reversed_range_fails_fast() {
        let table = table_with(&["Q 1 Marks"], vec![vec![1.0]]);
        let columns = ItemColumns::new(PATTERN);
        let err = aggregate(&table, 5, 1, &columns).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidItemRange { start: 5, end: 1 }
        ));
    }

    #[test]
    fn test_non_numeric_mark_fails() {
        let table = SourceTable::new(
            "Planilha2",
            vec!["Name".to_string(), "Q 1 Marks".to_string()],
            vec![vec![
                CellValue::Text("Ana".to_string()),
                CellValue::Text("certo".to_string()),
            ]],
        );
        let columns = ItemColumns::new(PATTERN);
        let err = aggregate(&table, 1, 1, &columns).unwrap_err();
        assert!(matches!(err, ReportError::InvalidCell { row: 1, .. }));
    }

    #[test]
    fn test_empty_table_gives_no_sums() {
        let table = table_with(&["Q 1 Marks"], vec![]);
        let columns = ItemColumns::new(PATTERN);
        assert!(aggregate(&table, 1, 1, &columns).unwrap().is_empty());
    }
}
