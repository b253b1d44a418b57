//! Payslip verification report export.
//!
//! Synthesizes the downloadable "Rapport de vérification": title and source
//! metadata, a summary box with the check counters and overall status, then
//! one red card per failing check. The card height is computed before the
//! card is placed, so a card that does not fit moves whole to a new page.

use crate::doc::{FontStyle, ReportDocument};
use crate::layout::{self, LINE_HEIGHT, MARGIN, SECTION_GAP, TOP_START};
use crate::{render, ExportError};
use report_types::{format_currency, CheckReport, CheckResult};
use std::path::{Path, PathBuf};

const SUMMARY_BOX_HEIGHT: f64 = 22.0;
const CARD_LINE_HEIGHT: f64 = 4.0;
const CARD_MIN_HEIGHT: f64 = 16.0;

/// Lays out the verification report as a paginated document.
///
/// Never fails: a report with no checks still yields a valid header-plus-
/// summary document.
pub fn build_report_document(report: &CheckReport) -> ReportDocument {
    let mut doc = ReportDocument::new();
    let content_w = layout::CONTENT_WIDTH;
    let mut y = TOP_START;

    // Title
    doc.set_font(FontStyle::Bold);
    doc.set_font_size(20.0);
    doc.set_text_color(30, 30, 35);
    doc.text("CEGI — Rapport de vérification", MARGIN, y);
    y += LINE_HEIGHT * 1.5;

    // Source file and generation date
    doc.set_font(FontStyle::Normal);
    doc.set_font_size(9.0);
    doc.set_text_color(110, 110, 120);
    let source = report.source_file.as_deref().unwrap_or("N/A");
    doc.text(&format!("Fichier : {source}"), MARGIN, y);
    y += LINE_HEIGHT;
    let today = chrono::Local::now().format("%d/%m/%Y");
    doc.text(&format!("Date : {today}"), MARGIN, y);
    y += SECTION_GAP;

    // Summary box
    doc.set_fill_color(245, 245, 250);
    doc.set_draw_color(210, 210, 220);
    doc.rounded_rect(MARGIN, y, content_w, SUMMARY_BOX_HEIGHT, 3.0);

    doc.set_font_size(10.0);
    doc.set_font(FontStyle::Bold);
    doc.set_text_color(30, 30, 35);
    doc.text("Résumé", MARGIN + 4.0, y + 7.0);

    doc.set_font(FontStyle::Normal);
    doc.set_font_size(9.0);
    doc.set_text_color(60, 60, 70);
    doc.text(
        &format!("Total : {} vérifications", report.total_checks),
        MARGIN + 4.0,
        y + 14.0,
    );
    doc.set_text_color(22, 163, 74);
    doc.text(&format!("Réussies : {}", report.passed_checks), MARGIN + 60.0, y + 14.0);
    doc.set_text_color(220, 38, 38);
    doc.text(&format!("Échouées : {}", report.failed_checks), MARGIN + 110.0, y + 14.0);

    doc.set_font(FontStyle::Bold);
    doc.set_font_size(9.0);
    if report.all_valid {
        doc.set_text_color(22, 163, 74);
        doc.text("Statut : VALIDE", MARGIN + 4.0, y + 20.0);
    } else {
        doc.set_text_color(220, 38, 38);
        doc.text("Statut : ERREURS DÉTECTÉES", MARGIN + 4.0, y + 20.0);
    }
    y += SUMMARY_BOX_HEIGHT + SECTION_GAP;

    // Failing checks
    let errors = report.failing_checks();
    if errors.is_empty() {
        doc.set_font(FontStyle::Italic);
        doc.set_font_size(10.0);
        doc.set_text_color(22, 163, 74);
        doc.text("Aucune erreur détectée.", MARGIN, y);
        return doc;
    }

    doc.set_font(FontStyle::Bold);
    doc.set_font_size(11.0);
    doc.set_text_color(30, 30, 35);
    doc.text(&format!("Erreurs détectées ({})", errors.len()), MARGIN, y);
    y += LINE_HEIGHT + 2.0;

    for (i, err) in errors.iter().enumerate() {
        let item_h = card_height(err, content_w);
        layout::ensure_space(&mut doc, &mut y, item_h);

        doc.set_fill_color(255, 245, 245);
        doc.set_draw_color(239, 68, 68);
        doc.rounded_rect(MARGIN, y, content_w, item_h, 2.0);

        let mut iy = y + 6.0;

        doc.set_font(FontStyle::Bold);
        doc.set_font_size(9.0);
        doc.set_text_color(185, 28, 28);
        let mut header = format!("#{} — {}", i + 1, err.test_name.to_uppercase());
        if let Some(line) = &err.line_number {
            header.push_str(&format!(" — Ligne {line}"));
        }
        doc.text(&header, MARGIN + 4.0, iy);
        iy += 5.0;

        if let Some(values) = value_row(err) {
            doc.set_font(FontStyle::Normal);
            doc.set_font_size(8.0);
            doc.set_text_color(80, 80, 90);
            doc.text(&values, MARGIN + 4.0, iy);
            iy += 5.0;
        }

        doc.set_font(FontStyle::Normal);
        doc.set_font_size(8.0);
        doc.set_text_color(60, 60, 70);
        doc.text_wrapped(&err.message, MARGIN + 4.0, iy, content_w - 8.0, CARD_LINE_HEIGHT);

        y += item_h + 3.0;
    }

    doc
}

/// Exact height of one failing-check card: fixed header, conditional value
/// row, wrapped message, fixed minimum. The same wrap settings are used for
/// drawing, so this can never disagree with the placed content.
fn card_height(err: &CheckResult, content_w: f64) -> f64 {
    let mut h = 10.0;
    if value_row(err).is_some() {
        h += 5.0;
    }
    let lines = layout::split_text_to_size(&err.message, content_w - 8.0, 8.0);
    h += lines.len() as f64 * CARD_LINE_HEIGHT + 4.0;
    h.max(CARD_MIN_HEIGHT)
}

/// Obtained / expected / difference summary line; absent fields are omitted
/// rather than rendered empty. Numeric values are shown as euro amounts,
/// non-numeric ones verbatim.
fn value_row(err: &CheckResult) -> Option<String> {
    if err.obtained_value.is_none() && err.expected_value.is_none() {
        return None;
    }
    let parts: Vec<String> = [
        err.obtained_value.as_deref().map(|v| format!("Obtenu : {}", format_currency(v))),
        err.expected_value.as_deref().map(|v| format!("Attendu : {}", format_currency(v))),
        err.difference.as_deref().map(|v| format!("Écart : {}", format_currency(v))),
    ]
    .into_iter()
    .flatten()
    .collect();
    Some(parts.join("   |   "))
}

/// File name for a generated report: fixed prefix plus a millisecond
/// timestamp to avoid collisions.
pub fn report_file_name() -> String {
    format!("rapport-cegi-{}.pdf", chrono::Utc::now().timestamp_millis())
}

/// Renders the report to PDF bytes.
pub fn export_report(report: &CheckReport) -> Result<Vec<u8>, ExportError> {
    let document = build_report_document(report);
    tracing::info!(
        pages = document.page_count(),
        failed = report.failed_checks,
        "verification report laid out"
    );
    render::render(&document)
}

/// Renders the report and writes it under `dir` with a timestamped name.
pub fn save_report(report: &CheckReport, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = export_report(report)?;
    let path = dir.join(report_file_name());
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "verification report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::DrawOp;
    use crate::layout::BOTTOM_LIMIT;
    use pretty_assertions::assert_eq;

    fn check(name: &str, valid: bool, line: Option<&str>, message: &str) -> CheckResult {
        CheckResult {
            test_name: name.to_string(),
            valid,
            is_line_error: line.is_some(),
            line_number: line.map(String::from),
            obtained_value: None,
            expected_value: None,
            difference: None,
            message: message.to_string(),
        }
    }

    fn report(checks: Vec<CheckResult>) -> CheckReport {
        let failed = checks.iter().filter(|c| !c.valid).count() as u32;
        let total = checks.len() as u32;
        CheckReport {
            source_file: Some("bulletin-mars.pdf".to_string()),
            extraction_success: true,
            all_valid: failed == 0,
            total_checks: total,
            passed_checks: total - failed,
            failed_checks: failed,
            checks,
        }
    }

    fn page_texts(doc: &ReportDocument) -> Vec<String> {
        doc.pages()
            .iter()
            .flat_map(|p| &p.ops)
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_all_valid_report_has_no_error_cards() {
        let doc = build_report_document(&report(vec![
            check("smic", true, None, ""),
            check("cotisations", true, None, ""),
        ]));

        let texts = page_texts(&doc);
        assert!(texts.iter().any(|t| t == "Aucune erreur détectée."));
        assert!(texts.iter().any(|t| t == "Statut : VALIDE"));
        assert!(!texts.iter().any(|t| t.starts_with("Erreurs détectées")));

        // Only the summary box is drawn.
        let rects = doc.pages()[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::RoundedRect { .. }))
            .count();
        assert_eq!(rects, 1);
    }

    #[test]
    fn test_failing_check_produces_card_with_line_label() {
        let doc = build_report_document(&report(vec![
            check("smic", true, None, ""),
            check("net_a_payer", false, Some("12"), "Montant incorrect"),
            check("cotisations", true, None, ""),
        ]));

        let texts = page_texts(&doc);
        assert!(texts.iter().any(|t| t == "Erreurs détectées (1)"));
        assert!(texts.iter().any(|t| t == "#1 — NET_A_PAYER — Ligne 12"));
        assert!(texts.iter().any(|t| t == "Statut : ERREURS DÉTECTÉES"));
    }

    #[test]
    fn test_value_row_formats_amounts_and_omits_absent_fields() {
        let mut err = check("net", false, None, "écart détecté");
        err.obtained_value = Some("1950.00".to_string());
        err.expected_value = Some("2000.00".to_string());
        let row = value_row(&err).unwrap();
        assert!(row.contains("Obtenu : 1\u{202F}950,00\u{00A0}€"));
        assert!(row.contains("Attendu : 2\u{202F}000,00\u{00A0}€"));
        assert!(!row.contains("Écart"));

        err.obtained_value = Some("n/c".to_string());
        assert!(value_row(&err).unwrap().contains("Obtenu : n/c"));

        let bare = check("net", false, None, "");
        assert_eq!(value_row(&bare), None);
    }

    #[test]
    fn test_card_height_minimum_and_growth() {
        let short = check("t", false, None, "court");
        let w = layout::CONTENT_WIDTH;
        assert_eq!(card_height(&short, w), CARD_MIN_HEIGHT);

        let long = check("t", false, None, &"mot ".repeat(200));
        assert!(card_height(&long, w) > CARD_MIN_HEIGHT);
    }

    #[test]
    fn test_many_errors_paginate_without_overflow() {
        let checks: Vec<CheckResult> = (0..40)
            .map(|i| {
                check(
                    &format!("test_{i}"),
                    false,
                    Some(&i.to_string()),
                    "Le montant obtenu ne correspond pas au montant attendu pour cette ligne \
                     du bulletin de paie, un écart significatif a été relevé.",
                )
            })
            .collect();
        let doc = build_report_document(&report(checks));
        assert!(doc.page_count() > 1);

        // No placed block may cross the bottom margin.
        for page in doc.pages() {
            for op in &page.ops {
                match op {
                    DrawOp::RoundedRect { y, height, .. } => {
                        assert!(y + height <= BOTTOM_LIMIT + 1e-9, "rect overflows page");
                    }
                    DrawOp::Text { y, .. } => {
                        assert!(*y <= BOTTOM_LIMIT + 1e-9, "text overflows page");
                    }
                }
            }
        }
    }

    #[test]
    fn test_degenerate_report_still_yields_document() {
        let doc = build_report_document(&report(vec![]));
        assert_eq!(doc.page_count(), 1);
        let texts = page_texts(&doc);
        assert!(texts.iter().any(|t| t == "CEGI — Rapport de vérification"));
    }

    #[test]
    fn test_missing_source_file_shows_placeholder() {
        let mut r = report(vec![]);
        r.source_file = None;
        let texts = page_texts(&build_report_document(&r));
        assert!(texts.iter().any(|t| t == "Fichier : N/A"));
    }

    #[test]
    fn test_file_name_has_prefix_and_extension() {
        let name = report_file_name();
        assert!(name.starts_with("rapport-cegi-"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn test_export_produces_loadable_pdf() {
        let bytes = export_report(&report(vec![check(
            "net_a_payer",
            false,
            Some("12"),
            "Montant incorrect",
        )]))
        .unwrap();
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
    }
}
