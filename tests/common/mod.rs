//! Test fixtures: tiny xlsx workbooks written with `zip`, and PDF text
//! extraction with `lopdf`.
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const ITEMS: u32 = 45;

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Num(f64),
    Empty,
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

/// Answer sheet with 90 item columns. Student `i` gets the first
/// `leading[i]` of items 1-45 and the first `trailing[i]` of items 46-90 right.
pub fn mark_sheet(name: &str, students: &[&str], leading: &[u32], trailing: &[u32]) -> Sheet {
    let mut header = vec![text("Name")];
    header.extend((1..=ITEMS * 2).map(|i| text(&format!("Q {} Marks", i))));

    let mut rows = vec![header];
    for (i, student) in students.iter().enumerate() {
        let mut row = vec![text(student)];
        row.extend((1..=ITEMS).map(|q| Cell::Num(if q <= leading[i] { 1.0 } else { 0.0 })));
        row.extend((1..=ITEMS).map(|q| Cell::Num(if q <= trailing[i] { 1.0 } else { 0.0 })));
        rows.push(row);
    }
    Sheet {
        name: name.to_string(),
        rows,
    }
}

pub fn essay_sheet(name: &str, students: &[&str], scores: &[f64]) -> Sheet {
    let mut rows = vec![vec![text("Name"), text("Nota Redacao")]];
    for (student, score) in students.iter().zip(scores) {
        rows.push(vec![text(student), Cell::Num(*score)]);
    }
    Sheet {
        name: name.to_string(),
        rows,
    }
}

/// Excel column letters for a 0-based index: 0 -> A, 26 -> AA.
fn column_letters(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn sheet_xml(sheet: &Sheet) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in sheet.rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letters(c), r + 1);
            match cell {
                Cell::Text(s) => xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference,
                    escape(s)
                )),
                Cell::Num(n) => xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n)),
                Cell::Empty => {}
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Write `sheets` as an xlsx workbook at `path`.
pub fn write_xlsx(path: &Path, sheets: &[Sheet]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );

    for (i, sheet) in sheets.iter().enumerate() {
        let n = i + 1;
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            n
        ));
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(&sheet.name),
            n,
            n
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            n, n
        ));
    }
    content_types.push_str("</Types>");
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let root_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

    let mut entries: Vec<(String, String)> = vec![
        ("[Content_Types].xml".to_string(), content_types),
        ("_rels/.rels".to_string(), root_rels.to_string()),
        ("xl/workbook.xml".to_string(), workbook),
        ("xl/_rels/workbook.xml.rels".to_string(), rels),
    ];
    for (i, sheet) in sheets.iter().enumerate() {
        entries.push((format!("xl/worksheets/sheet{}.xml", i + 1), sheet_xml(sheet)));
    }

    for (name, body) in entries {
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// The reference scenario: Ana aces Linguagens and writes a 600 essay,
/// Bruno gets nothing right and scores 0 on the essay.
pub fn reference_sheets() -> Vec<Sheet> {
    let students = ["Ana", "Bruno"];
    vec![
        mark_sheet("Planilha1", &students, &[45, 0], &[0, 0]),
        mark_sheet("Planilha2", &students, &[0, 0], &[0, 0]),
        essay_sheet("Planilha3", &students, &[600.0, 0.0]),
    ]
}

pub fn write_workbook(dir: &Path, sheets: &[Sheet]) -> PathBuf {
    let path = dir.join("simulado.xlsx");
    write_xlsx(&path, sheets);
    path
}

/// Every string shown with `Tj`, page by page, decoded from WinAnsi.
pub fn pdf_texts(path: &Path) -> Vec<String> {
    let doc = lopdf::Document::load(path).unwrap();
    let mut texts = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = doc.get_page_content(page_id).unwrap();
        let decoded = lopdf::content::Content::decode(&content).unwrap();
        for op in decoded.operations {
            if op.operator == "Tj" {
                if let Some(lopdf::Object::String(bytes, _)) = op.operands.first() {
                    texts.push(bytes.iter().map(|&b| b as char).collect());
                }
            }
        }
    }
    texts
}

fn encode(image: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

pub fn tiny_jpeg(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
    encode(image::DynamicImage::ImageRgb8(pixels), image::ImageFormat::Jpeg)
}

pub fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 90, 160, 255]));
    encode(image::DynamicImage::ImageRgba8(pixels), image::ImageFormat::Png)
}

/// Names of the image XObject filters in a written PDF, `None` when unfiltered.
pub fn image_filters(path: &Path) -> Vec<Option<String>> {
    let doc = lopdf::Document::load(path).unwrap();
    doc.objects
        .values()
        .filter_map(|obj| match obj {
            lopdf::Object::Stream(stream)
                if stream.dict.get(b"Subtype").and_then(|s| s.as_name()).ok()
                    == Some(b"Image".as_slice()) =>
            {
                Some(
                    stream
                        .dict
                        .get(b"Filter")
                        .and_then(|f| f.as_name())
                        .ok()
                        .map(|f| String::from_utf8_lossy(f).into_owned()),
                )
            }
            _ => None,
        })
        .collect()
}
