use super::schema::{LayoutConfig, ReportConfig, SheetConfig};
use crate::scoring::validate_scoring;

/// Validate the whole report configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &ReportConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.title.trim().is_empty() {
        errors.push("title: must not be empty".to_string());
    }
    if config.output.as_os_str().is_empty() {
        errors.push("output: must not be empty".to_string());
    }

    validate_sheets(&config.sheets, &mut errors);
    validate_layout(&config.layout, &mut errors);

    if let Err(scoring_errors) = validate_scoring(&config.scoring) {
        errors.extend(scoring_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_sheets(sheets: &SheetConfig, errors: &mut Vec<String>) {
    let named = [
        ("sheets.first", &sheets.first),
        ("sheets.second", &sheets.second),
        ("sheets.essay", &sheets.essay),
        ("sheets.name_column", &sheets.name_column),
        ("sheets.essay_column", &sheets.essay_column),
    ];
    for (key, value) in named {
        if value.trim().is_empty() {
            errors.push(format!("{}: must not be empty", key));
        }
    }

    if sheets.first == sheets.second
        || sheets.first == sheets.essay
        || sheets.second == sheets.essay
    {
        errors.push(format!(
            "sheets: first, second and essay must be different sheets (got '{}', '{}', '{}')",
            sheets.first, sheets.second, sheets.essay
        ));
    }

    let placeholders = sheets.item_column_pattern.matches("{}").count();
    if placeholders != 1 {
        errors.push(format!(
            "sheets.item_column_pattern: invalid '{}' - needs exactly one '{{}}' \
             for the item number",
            sheets.item_column_pattern
        ));
    }
}

fn validate_layout(layout: &LayoutConfig, errors: &mut Vec<String>) {
    let positive = [
        ("layout.page_width", layout.page_width),
        ("layout.page_height", layout.page_height),
        ("layout.title_font_size", layout.title_font_size),
        ("layout.table_font_size", layout.table_font_size),
        ("layout.title_height", layout.title_height),
        ("layout.row_height", layout.row_height),
        ("layout.name_column_width", layout.name_column_width),
        ("layout.score_column_width", layout.score_column_width),
        ("layout.logo_width", layout.logo_width),
    ];
    for (key, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("{}: must be a positive number", key));
        }
    }

    let non_negative = [
        ("layout.margin", layout.margin),
        ("layout.bottom_margin", layout.bottom_margin),
        ("layout.logo_gap", layout.logo_gap),
    ];
    for (key, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(format!("{}: must be zero or positive", key));
        }
    }

    if layout.margin * 2.0 >= layout.page_width {
        errors.push("layout.margin: leaves no room across the page".to_string());
    }
    if layout.margin + layout.bottom_margin + layout.row_height > layout.page_height {
        errors.push("layout.bottom_margin: leaves no room for a single row".to_string());
    }
}
