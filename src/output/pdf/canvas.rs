use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat, Stream};

use super::image::{LogoEncoding, LogoImage};
use super::metrics::{encode_win_ansi, text_width};
use crate::error::{ReportError, Result};

/// Points per millimetre.
const K: f32 = 72.0 / 25.4;
/// Border stroke width, in mm.
const LINE_WIDTH: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }
}

/// Page size and margins, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub bottom_margin: f32,
}

/// What a [`Canvas::cell`] call put on a page, kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnCell {
    /// 0-based page index
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    pub face: FontFace,
}

#[derive(Debug, Default)]
struct Page {
    operations: Vec<Operation>,
}

/// Flowing page layout in the style of a line printer: cells are appended
/// left to right, [`Canvas::ln`] returns to the left margin, and a cell that
/// would cross the bottom margin starts a new page first.
///
/// Coordinates are millimetres from the top-left corner; conversion to PDF
/// user space happens when operations are emitted.
#[derive(Debug)]
pub struct Canvas {
    setup: PageSetup,
    pages: Vec<Page>,
    cells: Vec<DrawnCell>,
    images: Vec<LogoImage>,
    x: f32,
    y: f32,
    last_height: f32,
    face: FontFace,
    font_size: f32,
}

impl Canvas {
    pub fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
            cells: Vec::new(),
            images: Vec::new(),
            x: setup.margin,
            y: setup.margin,
            last_height: 0.0,
            face: FontFace::Regular,
            font_size: 10.0,
        }
    }

    pub fn add_page(&mut self) {
        let mut page = Page::default();
        page.operations
            .push(Operation::new("w", vec![Object::Real(LINE_WIDTH * K)]));
        self.pages.push(page);
        self.x = self.setup.margin;
        self.y = self.setup.margin;
    }

    pub fn set_font(&mut self, face: FontFace, size: f32) {
        self.face = face;
        self.font_size = size;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cells(&self) -> &[DrawnCell] {
        &self.cells
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Width between the current position and the right margin.
    pub fn remaining_width(&self) -> f32 {
        self.setup.width - self.setup.margin - self.x
    }

    /// Append a cell with centered text at the current position and move
    /// right by `width`. A `width` of zero extends the cell to the right
    /// margin.
    pub fn cell(&mut self, width: f32, height: f32, text: &str, border: bool) {
        if self.pages.is_empty() {
            self.add_page();
        }
        if self.y + height > self.setup.height - self.setup.bottom_margin {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let width = if width == 0.0 { self.remaining_width() } else { width };
        let page_height = self.setup.height;
        let mut ops = Vec::new();

        if border {
            ops.push(Operation::new(
                "re",
                vec![
                    Object::Real(self.x * K),
                    Object::Real((page_height - self.y) * K),
                    Object::Real(width * K),
                    Object::Real(-height * K),
                ],
            ));
            ops.push(Operation::new("S", vec![]));
        }

        if !text.is_empty() {
            let text_w = text_width(self.face, self.font_size, text) / K;
            let dx = (width - text_w) / 2.0;
            let baseline = self.y + 0.5 * height + 0.3 * self.font_size / K;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(self.face.resource_name().as_bytes().to_vec()),
                    Object::Real(self.font_size),
                ],
            ));
            ops.push(Operation::new(
                "Td",
                vec![
                    Object::Real((self.x + dx) * K),
                    Object::Real((page_height - baseline) * K),
                ],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
        }

        self.current_page().operations.extend(ops);
        self.cells.push(DrawnCell {
            page: self.pages.len() - 1,
            x: self.x,
            y: self.y,
            width,
            height,
            text: text.to_string(),
            face: self.face,
        });

        self.x += width;
        self.last_height = height;
    }

    /// Line break: back to the left margin, down by the last cell height.
    pub fn ln(&mut self) {
        self.x = self.setup.margin;
        self.y += self.last_height;
    }

    /// Move down by `height` without drawing.
    pub fn skip(&mut self, height: f32) {
        if self.pages.is_empty() {
            self.add_page();
        }
        self.x = self.setup.margin;
        self.y += height;
    }

    /// Draw `image` with its top-left corner at (`x`, `y`), scaled to
    /// `width` with the aspect ratio kept. Returns the drawn height.
    pub fn image(&mut self, image: &LogoImage, x: f32, y: f32, width: f32) -> f32 {
        if self.pages.is_empty() {
            self.add_page();
        }
        let height = image.height_for_width(width);
        let name = match self.images.iter().position(|known| known == image) {
            Some(idx) => image_name(idx),
            None => {
                self.images.push(image.clone());
                image_name(self.images.len() - 1)
            }
        };

        let page_height = self.setup.height;
        let ops = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(width * K),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(height * K),
                    Object::Real(x * K),
                    Object::Real((page_height - y - height) * K),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ];
        self.current_page().operations.extend(ops);
        height
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Assemble the pages into a PDF document.
    ///
    /// `info` entries (e.g. `Title`, `CreationDate`) go into the document
    /// information dictionary.
    pub fn into_document(mut self, info: Dictionary) -> Result<Document> {
        if self.pages.is_empty() {
            self.add_page();
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut xobjects = Dictionary::new();
        for (idx, image) in self.images.iter().enumerate() {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(image.width),
                "Height" => i64::from(image.height),
                "ColorSpace" => image.color_space(),
                "BitsPerComponent" => i64::from(image.bits_per_component),
            };
            if image.encoding == LogoEncoding::Dct {
                dict.set("Filter", "DCTDecode");
            }
            let mut stream = Stream::new(dict, image.data.clone());
            if image.encoding == LogoEncoding::Raw {
                stream
                    .compress()
                    .map_err(|e| ReportError::render(format!("failed to compress logo: {}", e)))?;
            }
            let image_id = doc.add_object(stream);
            xobjects.set(image_name(idx), image_id);
        }

        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
            "XObject" => xobjects,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let content = Content {
                operations: page.operations,
            };
            let encoded = content
                .encode()
                .map_err(|e| ReportError::render(format!("failed to encode page content: {}", e)))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.setup.width * K),
                Object::Real(self.setup.height * K),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }
}

fn image_name(idx: usize) -> String {
    format!("Im{}", idx + 1)
}
