pub mod config;
pub mod consistency;
pub mod error;
pub mod logging;
pub mod ordering;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod workbook;

pub use error::{ErrorKind, ReportError};
