//! One report run: load, check, score, order, render, persist.

use tracing::info;

use crate::config::{validate_config, ReportConfig};
use crate::consistency::validate_tables;
use crate::error::{ReportError, Result};
use crate::ordering::order;
use crate::output::{LogoImage, ReportRenderer, TableSpec};
use crate::scoring::{ResultSet, ScoreCalculator};
use crate::workbook::load_workbook;

/// What a successful run produced.
#[derive(Debug)]
pub struct ReportSummary {
    pub results: ResultSet,
    pub pages: usize,
}

/// Everything up to (not including) rendering: the ordered result set.
///
/// Fails before any arithmetic if the sheets disagree on who the students
/// are.
pub fn compute_results(config: &ReportConfig) -> Result<ResultSet> {
    validate_config(config).map_err(|problems| ReportError::InvalidConfig { problems })?;

    let workbook = load_workbook(&config.input, &config.sheets)?;
    let identities = validate_tables(&workbook.tables(), &config.sheets.name_column)?;
    info!("{} students matched across all sheets", identities.len());

    let calculator = ScoreCalculator::new(&config.scoring, &config.sheets);
    let results = calculator.calculate(&workbook, identities)?;

    Ok(match config.order {
        Some(mode) => {
            info!("Ordering by {}", mode);
            order(results, mode)
        }
        None => results,
    })
}

/// Full run. The output file is only created once the whole document has
/// been rendered in memory.
pub fn run(config: &ReportConfig) -> Result<ReportSummary> {
    let results = compute_results(config)?;

    let logo = config
        .logo
        .as_deref()
        .map(LogoImage::load)
        .transpose()?;

    let table = TableSpec::from_layout(&config.layout);
    let report = ReportRenderer::new(&config.layout).render(
        &results,
        &config.title,
        &table,
        logo.as_ref(),
    )?;
    let pages = report.page_count();
    report.save(&config.output)?;

    Ok(ReportSummary { results, pages })
}
