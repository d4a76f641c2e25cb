use serde::Serialize;
use tracing::{debug, warn};

use super::aggregate::{aggregate, ItemColumns};
use super::config::ScoringConfig;
use super::subject::{ScaledSubject, Subject};
use crate::config::SheetConfig;
use crate::error::{ReportError, Result};
use crate::workbook::{ExamWorkbook, SourceTable};

/// Final per-subject scores of one student.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectScores {
    pub linguagens: f64,
    pub natureza: f64,
    pub matematica: f64,
    pub humanas: f64,
    pub redacao: f64,
}

impl SubjectScores {
    pub fn get(&self, subject: Subject) -> f64 {
        match subject {
            Subject::Linguagens => self.linguagens,
            Subject::Natureza => self.natureza,
            Subject::Matematica => self.matematica,
            Subject::Humanas => self.humanas,
            Subject::Redacao => self.redacao,
        }
    }

    /// Scores in [`Subject::ALL`] order.
    pub fn values(&self) -> [f64; 5] {
        Subject::ALL.map(|s| self.get(s))
    }

    /// Unweighted mean of all five scores.
    pub fn mean(&self) -> f64 {
        self.values().iter().sum::<f64>() / Subject::ALL.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub name: String,
    pub scores: SubjectScores,
    pub mean: f64,
}

impl StudentRecord {
    pub fn new(name: String, scores: SubjectScores) -> Self {
        let mean = scores.mean();
        Self { name, scores, mean }
    }
}

/// Student records in report order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<StudentRecord>,
}

impl ResultSet {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<StudentRecord> {
        &mut self.records
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Turns validated sheets into scored student records.
pub struct ScoreCalculator<'a> {
    scoring: &'a ScoringConfig,
    sheets: &'a SheetConfig,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(scoring: &'a ScoringConfig, sheets: &'a SheetConfig) -> Self {
        Self { scoring, sheets }
    }

    /// Scaled scores for one subject, one per row of its sheet.
    pub fn subject_scores(
        &self,
        workbook: &ExamWorkbook,
        subject: ScaledSubject,
    ) -> Result<Vec<f64>> {
        let (sheet, block) = subject.location();
        let table = workbook.answer_sheet(sheet);
        let items = self.scoring.items_per_subject;
        let (start, end) = block.item_range(items);
        let columns = ItemColumns::new(&self.sheets.item_column_pattern);

        if items == 0 {
            return Err(ReportError::Division {
                subject: subject.to_string(),
            });
        }

        let raw = aggregate(table, start, end, &columns)?;
        let range = self.scoring.scales.get(subject);
        debug!(
            "{}: items {}-{} of '{}', range {}..{}",
            subject,
            start,
            end,
            table.name(),
            range.min,
            range.max
        );

        raw.into_iter()
            .enumerate()
            .map(|(row, correct)| {
                if correct > f64::from(items) {
                    warn!(
                        "{}: row {} of '{}' has {} correct out of {} items",
                        subject,
                        row + 1,
                        table.name(),
                        correct,
                        items
                    );
                }
                range.scale(correct, items).map_err(|_| ReportError::Division {
                    subject: subject.to_string(),
                })
            })
            .collect()
    }

    /// Essay scores as written in the essay sheet. Empty cells read as 0.0.
    pub fn essay_scores(&self, workbook: &ExamWorkbook) -> Result<Vec<f64>> {
        let table = &workbook.essay;
        let col = table.require_column(&self.sheets.essay_column)?;
        (0..table.row_count())
            .map(|row| {
                if table.cell(row, col).is_empty() {
                    warn!(
                        "'{}' row {}: empty {} read as 0.0",
                        table.name(),
                        row + 1,
                        self.sheets.essay_column
                    );
                }
                table.number_at(row, col)
            })
            .collect()
    }

    /// Every sheet must hold exactly one row per identity.
    fn check_row_count(&self, table: &SourceTable, identities: &[String]) -> Result<()> {
        if table.row_count() == identities.len() {
            return Ok(());
        }
        let row = table.row_count().min(identities.len());
        let found = table
            .column_index(&self.sheets.name_column)
            .map(|col| table.cell(row, col).as_text())
            .filter(|name| row < table.row_count() && !name.is_empty());
        Err(ReportError::IdentityMismatch {
            sheet: table.name().to_string(),
            reference_sheet: self.sheets.first.clone(),
            row: row + 1,
            expected: identities.get(row).cloned(),
            found,
        })
    }

    /// Build one record per identity.
    ///
    /// `identities` must come from [`crate::consistency::validate_tables`] over
    /// the same workbook, so row `i` of every sheet belongs to `identities[i]`.
    pub fn calculate(&self, workbook: &ExamWorkbook, identities: Vec<String>) -> Result<ResultSet> {
        for table in workbook.tables() {
            self.check_row_count(table, &identities)?;
        }

        let linguagens = self.subject_scores(workbook, ScaledSubject::Linguagens)?;
        let natureza = self.subject_scores(workbook, ScaledSubject::Natureza)?;
        let matematica = self.subject_scores(workbook, ScaledSubject::Matematica)?;
        let humanas = self.subject_scores(workbook, ScaledSubject::Humanas)?;
        let redacao = self.essay_scores(workbook)?;

        let records = identities
            .into_iter()
            .zip(linguagens)
            .zip(natureza)
            .zip(matematica)
            .zip(humanas)
            .zip(redacao)
            .map(|(((((name, linguagens), natureza), matematica), humanas), redacao)| {
                let scores = SubjectScores {
                    linguagens,
                    natureza,
                    matematica,
                    humanas,
                    redacao,
                };
                StudentRecord::new(name, scores)
            })
            .collect();

        Ok(ResultSet::new(records))
    }
}
