use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ordering::OrderMode;
use crate::scoring::ScoringConfig;

/// Everything a report run needs, loaded from YAML and overridable from the
/// command line.
///
/// Example YAML:
/// ```yaml
/// input: simulado.xlsx
/// output: Resultados_Simulado_ENEM.pdf
/// logo: logo.jpg
/// title: Resultados do Simulado ENEM
/// order: mean-desc
/// sheets:
///   first: Planilha1
///   second: Planilha2
///   essay: Planilha3
/// scoring:
///   items_per_subject: 45
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Image drawn centered above the title on the first page
    #[serde(default)]
    pub logo: Option<PathBuf>,

    #[serde(default = "default_title")]
    pub title: String,

    /// Row order; `None` keeps the order of the sheets
    #[serde(default)]
    pub order: Option<OrderMode>,

    #[serde(default)]
    pub sheets: SheetConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_input() -> PathBuf {
    PathBuf::from("simulado.xlsx")
}

fn default_output() -> PathBuf {
    PathBuf::from("Resultados_Simulado_ENEM.pdf")
}

fn default_title() -> String {
    "Resultados do Simulado ENEM".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            logo: None,
            title: default_title(),
            order: None,
            sheets: SheetConfig::default(),
            scoring: ScoringConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Sheet and column names inside the workbook.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Linguagens (leading items) and Natureza (trailing items)
    pub first: String,
    /// Matemática (leading items) and Humanas (trailing items)
    pub second: String,
    /// Essay scores
    pub essay: String,
    pub name_column: String,
    pub essay_column: String,
    /// Item mark header, `{}` stands for the 1-based item number
    pub item_column_pattern: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            first: "Planilha1".to_string(),
            second: "Planilha2".to_string(),
            essay: "Planilha3".to_string(),
            name_column: "Name".to_string(),
            essay_column: "Nota Redacao".to_string(),
            item_column_pattern: "Q {} Marks".to_string(),
        }
    }
}

/// Page geometry in millimetres and font sizes in points.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Left, right and top margin
    pub margin: f32,
    /// Content stops this far above the bottom edge; the next cell starts a new page
    pub bottom_margin: f32,
    pub title_font_size: f32,
    pub table_font_size: f32,
    pub title_height: f32,
    pub row_height: f32,
    pub name_column_width: f32,
    pub score_column_width: f32,
    pub logo_width: f32,
    /// Space kept free between the logo and the title
    pub logo_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            bottom_margin: 13.0,
            title_font_size: 14.0,
            table_font_size: 10.0,
            title_height: 10.0,
            row_height: 7.0,
            name_column_width: 58.0,
            score_column_width: 22.0,
            logo_width: 40.0,
            logo_gap: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config: ReportConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.sheets.first, "Planilha1");
        assert_eq!(config.layout.row_height, 7.0);
        assert!(config.order.is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
input: turma-b.xlsx
order: mean-desc
sheets:
  essay: Redacao
layout:
  row_height: 8
"#;
        let config: ReportConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.input, PathBuf::from("turma-b.xlsx"));
        assert_eq!(config.order, Some(OrderMode::ByMeanDesc));
        assert_eq!(config.sheets.essay, "Redacao");
        assert_eq!(config.sheets.first, "Planilha1");
        assert_eq!(config.layout.row_height, 8.0);
        assert_eq!(config.layout.name_column_width, 58.0);
    }

    #[test]
    fn test_unknown_order_mode_rejected() {
        let result: Result<ReportConfig, _> = serde_saphyr::from_str("order: best-first");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ReportConfig, _> = serde_saphyr::from_str("colour: blue");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = ReportConfig {
            logo: Some(PathBuf::from("logo.jpg")),
            order: Some(OrderMode::ByNameDesc),
            ..ReportConfig::default()
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ReportConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
