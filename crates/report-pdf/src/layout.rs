//! Page geometry, text measurement and page-break primitives.
//!
//! All layout math is in millimetres on an A4 page; conversion to PDF
//! points happens only at serialization. The width estimate used to wrap
//! text here is the same one used when drawing, so height estimation and
//! placement can never disagree.

use crate::doc::ReportDocument;

/// A4 portrait, millimetres.
pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

/// Uniform page margin.
pub const MARGIN: f64 = 14.0;

/// Vertical cursor position at the top of every page.
pub const TOP_START: f64 = 20.0;

/// Body line height.
pub const LINE_HEIGHT: f64 = 6.0;

/// Gap between sections.
pub const SECTION_GAP: f64 = 8.0;

/// Lowest allowed bottom edge for a placed block.
pub const BOTTOM_LIMIT: f64 = PAGE_HEIGHT - MARGIN;

const MM_PER_PT: f64 = 25.4 / 72.0;

/// Average Helvetica advance as a fraction of the font size. An estimate,
/// not a metric lookup; it only has to be used consistently.
const AVG_CHAR_WIDTH_EM: f64 = 0.5;

/// Full content width between the margins.
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

/// Estimated width in millimetres of `text` at `font_size` points.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * AVG_CHAR_WIDTH_EM * MM_PER_PT
}

/// Greedy word wrap of `text` into lines at most `max_width` millimetres
/// wide at `font_size` points. A single word wider than the limit is split
/// at the character that would overflow. Always returns at least one line.
pub fn split_text_to_size(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        // Word alone may still overflow; hard-split it.
        let mut piece = String::new();
        for c in word.chars() {
            piece.push(c);
            if text_width(&piece, font_size) > max_width && piece.chars().count() > 1 {
                piece.pop();
                lines.push(std::mem::take(&mut piece));
                piece.push(c);
            }
        }
        current = piece;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Starts a new page unless a block of `needed` millimetres fits between
/// the cursor and the bottom margin. The cursor is reset to the top of the
/// new page. Blocks taller than a full page are placed anyway (they cannot
/// fit anywhere).
pub fn ensure_space(doc: &mut ReportDocument, y: &mut f64, needed: f64) {
    if *y + needed > BOTTOM_LIMIT && *y > TOP_START {
        doc.add_page();
        *y = TOP_START;
    }
}
