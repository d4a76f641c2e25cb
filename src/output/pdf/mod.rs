mod canvas;
mod image;
mod metrics;
mod report;

pub use canvas::{Canvas, DrawnCell, FontFace, PageSetup};
pub use self::image::LogoImage;
pub use report::{format_score, row_cells, ColumnSpec, RenderedReport, ReportRenderer, TableSpec};
