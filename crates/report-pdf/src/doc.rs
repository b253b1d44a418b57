//! In-memory paginated output document.
//!
//! `ReportDocument` records typed draw instructions page by page, mirroring
//! a stateful drawing surface: font, size and colors are set once and apply
//! to subsequent operations. The structure is owned by a single synthesis
//! call and discarded after serialization.

use crate::layout;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// One draw instruction. Coordinates are millimetres from the top-left of
/// the page; text `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: f64,
        style: FontStyle,
        color: Color,
        align: TextAlign,
        text: String,
    },
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: Color,
        stroke: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Builder for the paginated export document.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pages: Vec<Page>,
    font_style: FontStyle,
    font_size: f64,
    text_color: Color,
    fill_color: Color,
    draw_color: Color,
}

impl ReportDocument {
    /// Starts a document with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            font_style: FontStyle::Normal,
            font_size: 10.0,
            text_color: Color::rgb(0, 0, 0),
            fill_color: Color::rgb(255, 255, 255),
            draw_color: Color::rgb(0, 0, 0),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub fn set_font(&mut self, style: FontStyle) {
        self.font_style = style;
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    pub fn set_text_color(&mut self, r: u8, g: u8, b: u8) {
        self.text_color = Color::rgb(r, g, b);
    }

    pub fn set_fill_color(&mut self, r: u8, g: u8, b: u8) {
        self.fill_color = Color::rgb(r, g, b);
    }

    pub fn set_draw_color(&mut self, r: u8, g: u8, b: u8) {
        self.draw_color = Color::rgb(r, g, b);
    }

    /// Places a left-aligned text run at `(x, y)` with the current style.
    pub fn text(&mut self, text: &str, x: f64, y: f64) {
        self.push_text(text, x, y, TextAlign::Left);
    }

    /// Places a text run whose right edge sits at `x`.
    pub fn text_right(&mut self, text: &str, x: f64, y: f64) {
        self.push_text(text, x, y, TextAlign::Right);
    }

    /// Places pre-wrapped lines stacked downward with spacing `line_h`.
    pub fn text_lines(&mut self, lines: &[String], x: f64, y: f64, line_h: f64) {
        for (i, line) in lines.iter().enumerate() {
            self.push_text(line, x, y + i as f64 * line_h, TextAlign::Left);
        }
    }

    /// Wraps `text` to `max_width` with the shared width estimate and
    /// places the resulting lines. Returns the number of lines placed.
    pub fn text_wrapped(&mut self, text: &str, x: f64, y: f64, max_width: f64, line_h: f64) -> usize {
        let lines = layout::split_text_to_size(text, max_width, self.font_size);
        self.text_lines(&lines, x, y, line_h);
        lines.len()
    }

    /// Draws a rounded rectangle filled with the current fill color and
    /// stroked with the current draw color, top-left corner at `(x, y)`.
    pub fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let op = DrawOp::RoundedRect {
            x,
            y,
            width,
            height,
            radius,
            fill: self.fill_color,
            stroke: self.draw_color,
        };
        self.current_page().ops.push(op);
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    fn push_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) {
        let op = DrawOp::Text {
            x,
            y,
            size: self.font_size,
            style: self.font_style,
            color: self.text_color,
            align,
            text: text.to_string(),
        };
        self.current_page().ops.push(op);
    }

    fn current_page(&mut self) -> &mut Page {
        // A document always holds at least one page.
        self.pages.last_mut().expect("document has no pages")
    }
}

impl Default for ReportDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_document_has_one_empty_page() {
        let doc = ReportDocument::new();
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages()[0].ops.is_empty());
    }

    #[test]
    fn test_text_captures_current_style() {
        let mut doc = ReportDocument::new();
        doc.set_font(FontStyle::Bold);
        doc.set_font_size(20.0);
        doc.set_text_color(30, 30, 35);
        doc.text("CEGI", 14.0, 20.0);

        match &doc.pages()[0].ops[0] {
            DrawOp::Text { size, style, color, text, .. } => {
                assert_eq!(*size, 20.0);
                assert_eq!(*style, FontStyle::Bold);
                assert_eq!(*color, Color::rgb(30, 30, 35));
                assert_eq!(text, "CEGI");
            }
            other => panic!("expected text op, got {other:?}"),
        }
    }

    #[test]
    fn test_ops_land_on_current_page() {
        let mut doc = ReportDocument::new();
        doc.text("page 1", 14.0, 20.0);
        doc.add_page();
        doc.text("page 2", 14.0, 20.0);

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages()[0].ops.len(), 1);
        assert_eq!(doc.pages()[1].ops.len(), 1);
    }

    #[test]
    fn test_text_lines_stack_downward() {
        let mut doc = ReportDocument::new();
        let lines = vec!["un".to_string(), "deux".to_string(), "trois".to_string()];
        doc.text_lines(&lines, 14.0, 100.0, 4.0);

        let ys: Vec<f64> = doc.pages()[0]
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::Text { y, .. } => *y,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(ys, vec![100.0, 104.0, 108.0]);
    }

    #[test]
    fn test_rect_captures_fill_and_stroke() {
        let mut doc = ReportDocument::new();
        doc.set_fill_color(255, 245, 245);
        doc.set_draw_color(239, 68, 68);
        doc.rounded_rect(14.0, 50.0, 182.0, 22.0, 3.0);

        match &doc.pages()[0].ops[0] {
            DrawOp::RoundedRect { fill, stroke, .. } => {
                assert_eq!(*fill, Color::rgb(255, 245, 245));
                assert_eq!(*stroke, Color::rgb(239, 68, 68));
            }
            other => panic!("expected rect op, got {other:?}"),
        }
    }
}
