//! Serialization of a [`ReportDocument`] to PDF bytes.
//!
//! Pages are emitted as lopdf content streams against the base-14
//! Helvetica family, so nothing is embedded. Text is encoded as WinAnsi,
//! which covers the French strings (accents, €, em dash) of the reports.

use crate::doc::{Color, DrawOp, FontStyle, Page, ReportDocument, TextAlign};
use crate::layout::{self, PAGE_HEIGHT, PAGE_WIDTH};
use crate::ExportError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

const PT_PER_MM: f64 = 72.0 / 25.4;

/// Cubic Bézier circle-arc constant.
const BEZIER_K: f64 = 0.552_284_749_831;

/// Stroke width for box borders, points.
const BORDER_WIDTH: f32 = 0.57;

/// Serializes the finished document. Called only after layout completes,
/// so a failure can never leave a half-written download.
pub fn render(report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_normal = doc.add_object(base_font("Helvetica"));
    let font_bold = doc.add_object(base_font("Helvetica-Bold"));
    let font_italic = doc.add_object(base_font("Helvetica-Oblique"));
    let font_resources = dictionary! {
        "F1" => Object::Reference(font_normal),
        "F2" => Object::Reference(font_bold),
        "F3" => Object::Reference(font_italic),
    };
    let resources_id = doc.add_object(dictionary! {
        "Font" => Object::Dictionary(font_resources),
    });

    let mut page_ids = Vec::with_capacity(report.page_count());
    for page in report.pages() {
        let content = page_content(page);
        let encoded = content
            .encode()
            .map_err(|e| ExportError::ContentError(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_dict = dictionary! {
            "Type" => Object::Name(b"Page".to_vec()),
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(mm_to_pt(PAGE_WIDTH) as f32),
                Object::Real(mm_to_pt(PAGE_HEIGHT) as f32),
            ]),
            "Resources" => Object::Reference(resources_id),
            "Contents" => Object::Reference(content_id),
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let pages_dict = dictionary! {
        "Type" => Object::Name(b"Pages".to_vec()),
        "Count" => Object::Integer(page_ids.len() as i64),
        "Kids" => Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::SaveError(e.to_string()))?;
    Ok(buffer)
}

fn base_font(name: &str) -> Dictionary {
    dictionary! {
        "Type" => Object::Name(b"Font".to_vec()),
        "Subtype" => Object::Name(b"Type1".to_vec()),
        "BaseFont" => Object::Name(name.as_bytes().to_vec()),
        "Encoding" => Object::Name(b"WinAnsiEncoding".to_vec()),
    }
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, size, style, color, align, text } => {
                emit_text(&mut operations, text, *x, *y, *size, *style, *color, *align);
            }
            DrawOp::RoundedRect { x, y, width, height, radius, fill, stroke } => {
                emit_rounded_rect(&mut operations, *x, *y, *width, *height, *radius, *fill, *stroke);
            }
        }
    }
    Content { operations }
}

#[allow(clippy::too_many_arguments)]
fn emit_text(
    ops: &mut Vec<Operation>,
    text: &str,
    x: f64,
    y: f64,
    size: f64,
    style: FontStyle,
    color: Color,
    align: TextAlign,
) {
    let font = match style {
        FontStyle::Normal => b"F1".to_vec(),
        FontStyle::Bold => b"F2".to_vec(),
        FontStyle::Italic => b"F3".to_vec(),
    };
    let x_mm = match align {
        TextAlign::Left => x,
        TextAlign::Right => x - layout::text_width(text, size),
    };
    let (r, g, b) = scale_color(color);

    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font), real(size)],
    ));
    ops.push(Operation::new(
        "Td",
        vec![real(mm_to_pt(x_mm)), real(mm_to_pt(PAGE_HEIGHT - y))],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_winansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

#[allow(clippy::too_many_arguments)]
fn emit_rounded_rect(
    ops: &mut Vec<Operation>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    fill: Color,
    stroke: Color,
) {
    let x0 = mm_to_pt(x);
    let x1 = mm_to_pt(x + width);
    let y_top = mm_to_pt(PAGE_HEIGHT - y);
    let y_bot = mm_to_pt(PAGE_HEIGHT - y - height);
    let r = mm_to_pt(radius).min((x1 - x0) / 2.0).min((y_top - y_bot) / 2.0);
    let k = BEZIER_K * r;

    let (fr, fg, fb) = scale_color(fill);
    let (sr, sg, sb) = scale_color(stroke);
    ops.push(Operation::new("rg", vec![real(fr), real(fg), real(fb)]));
    ops.push(Operation::new("RG", vec![real(sr), real(sg), real(sb)]));
    ops.push(Operation::new("w", vec![Object::Real(BORDER_WIDTH)]));

    // Clockwise path with one Bézier per corner.
    ops.push(Operation::new("m", vec![real(x0 + r), real(y_top)]));
    ops.push(Operation::new("l", vec![real(x1 - r), real(y_top)]));
    ops.push(Operation::new(
        "c",
        vec![
            real(x1 - r + k), real(y_top),
            real(x1), real(y_top - r + k),
            real(x1), real(y_top - r),
        ],
    ));
    ops.push(Operation::new("l", vec![real(x1), real(y_bot + r)]));
    ops.push(Operation::new(
        "c",
        vec![
            real(x1), real(y_bot + r - k),
            real(x1 - r + k), real(y_bot),
            real(x1 - r), real(y_bot),
        ],
    ));
    ops.push(Operation::new("l", vec![real(x0 + r), real(y_bot)]));
    ops.push(Operation::new(
        "c",
        vec![
            real(x0 + r - k), real(y_bot),
            real(x0), real(y_bot + r - k),
            real(x0), real(y_bot + r),
        ],
    ));
    ops.push(Operation::new("l", vec![real(x0), real(y_top - r)]));
    ops.push(Operation::new(
        "c",
        vec![
            real(x0), real(y_top - r + k),
            real(x0 + r - k), real(y_top),
            real(x0 + r), real(y_top),
        ],
    ));
    ops.push(Operation::new("h", vec![]));
    // Fill then stroke, like the original's "FD" box style.
    ops.push(Operation::new("B", vec![]));
}

fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

fn scale_color(c: Color) -> (f64, f64, f64) {
    (
        f64::from(c.r) / 255.0,
        f64::from(c.g) / 255.0,
        f64::from(c.b) / 255.0,
    )
}

/// Encodes text as WinAnsi bytes. Latin-1 maps through directly; the
/// 0x80-0x9F window carries the Windows typographic extras actually used
/// by the reports (€, dashes, curly quotes). Anything else degrades to '?'.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // €
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85, // …
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92, // '
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96, // –
            '\u{2014}' => 0x97, // —
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{0178}' => 0x9F,
            '\u{202F}' => 0xA0, // narrow no-break space -> nbsp
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}
