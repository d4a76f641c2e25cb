pub mod formatter;
pub mod pdf;

pub use formatter::{
    format_json, format_results_table, format_tsv, should_use_colors, OutputFormat,
};
pub use pdf::{LogoImage, RenderedReport, ReportRenderer, TableSpec};
