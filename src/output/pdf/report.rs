use std::io::Write;
use std::path::Path;

use atomic_write_file::AtomicWriteFile;
use lopdf::{dictionary, Document, Object, StringFormat};
use tracing::{debug, info};

use super::canvas::{Canvas, DrawnCell, FontFace, PageSetup};
use super::image::LogoImage;
use super::metrics::encode_win_ansi;
use crate::config::LayoutConfig;
use crate::error::{ReportError, Result};
use crate::scoring::{ResultSet, StudentRecord, Subject};

/// One table column: header label and width in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub label: String,
    pub width: f32,
}

/// Column layout and row height of the score table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub columns: Vec<ColumnSpec>,
    pub row_height: f32,
}

impl TableSpec {
    /// Seven columns: the name, the five subjects and the overall mean.
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        let mut columns = vec![ColumnSpec {
            label: "Nome".to_string(),
            width: layout.name_column_width,
        }];
        columns.extend(Subject::ALL.iter().map(|s| ColumnSpec {
            label: s.label().to_string(),
            width: layout.score_column_width,
        }));
        columns.push(ColumnSpec {
            label: "Média Geral".to_string(),
            width: layout.score_column_width,
        });
        Self {
            columns,
            row_height: layout.row_height,
        }
    }
}

/// Text of one data row, numbers at one decimal place.
pub fn row_cells(record: &StudentRecord) -> Vec<String> {
    let mut cells = Vec::with_capacity(Subject::ALL.len() + 2);
    cells.push(record.name.clone());
    cells.extend(record.scores.values().iter().map(|v| format_score(*v)));
    cells.push(format_score(record.mean));
    cells
}

pub fn format_score(value: f64) -> String {
    format!("{:.1}", value)
}

/// A finished report held in memory.
pub struct RenderedReport {
    document: Document,
    cells: Vec<DrawnCell>,
    pages: usize,
    data_rows: usize,
}

impl RenderedReport {
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn data_rows(&self) -> usize {
        self.data_rows
    }

    /// Every cell drawn, in drawing order (title, header row, data rows).
    pub fn cells(&self) -> &[DrawnCell] {
        &self.cells
    }

    /// Write the PDF to `path`.
    ///
    /// The bytes go to a temporary file that replaces `path` only once fully
    /// written, so a failed save never leaves a partial report behind.
    pub fn save(mut self, path: &Path) -> Result<()> {
        let persist_error = |source: std::io::Error| ReportError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let mut file = AtomicWriteFile::open(path).map_err(persist_error)?;
        self.document
            .save_to(&mut file)
            .map_err(|e| ReportError::render(format!("failed to serialize PDF: {}", e)))?;
        file.flush().map_err(persist_error)?;
        file.commit().map_err(persist_error)?;

        info!(
            "Wrote {} ({} pages, {} students)",
            path.display(),
            self.pages,
            self.data_rows
        );
        Ok(())
    }
}

/// Lays out the score table over as many pages as it needs.
///
/// Alignment (centered) and borders are fixed; geometry comes from
/// [`LayoutConfig`].
pub struct ReportRenderer<'a> {
    layout: &'a LayoutConfig,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(layout: &'a LayoutConfig) -> Self {
        Self { layout }
    }

    fn page_setup(&self) -> PageSetup {
        PageSetup {
            width: self.layout.page_width,
            height: self.layout.page_height,
            margin: self.layout.margin,
            bottom_margin: self.layout.bottom_margin,
        }
    }

    pub fn render(
        &self,
        results: &ResultSet,
        title: &str,
        table: &TableSpec,
        logo: Option<&LogoImage>,
    ) -> Result<RenderedReport> {
        let layout = self.layout;
        let mut canvas = Canvas::new(self.page_setup());
        canvas.add_page();

        if let Some(logo) = logo {
            let x = (layout.page_width - layout.logo_width) / 2.0;
            let y = canvas.y();
            let height = canvas.image(logo, x, y, layout.logo_width);
            canvas.skip(height + layout.logo_gap);
            debug!("Logo drawn at {:.1}mm wide, {:.1}mm tall", layout.logo_width, height);
        }

        canvas.set_font(FontFace::Regular, layout.title_font_size);
        canvas.cell(0.0, layout.title_height, title, false);
        canvas.ln();

        canvas.set_font(FontFace::Bold, layout.table_font_size);
        for column in &table.columns {
            canvas.cell(column.width, table.row_height, &column.label, true);
        }
        canvas.ln();

        canvas.set_font(FontFace::Regular, layout.table_font_size);
        for record in results {
            let texts = row_cells(record);
            for (column, text) in table.columns.iter().zip(&texts) {
                canvas.cell(column.width, table.row_height, text, true);
            }
            canvas.ln();
        }

        let pages = canvas.page_count();
        let cells = canvas.cells().to_vec();
        let document = canvas.into_document(dictionary! {
            "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::string_literal(
                concat!("simulado-report ", env!("CARGO_PKG_VERSION"))
            ),
            "CreationDate" => Object::string_literal(
                chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()
            ),
        })?;

        debug!("Rendered {} rows on {} pages", results.len(), pages);
        Ok(RenderedReport {
            document,
            cells,
            pages,
            data_rows: results.len(),
        })
    }
}
