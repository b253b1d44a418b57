//! Severance computation export.
//!
//! Synthesizes the "Calcul d'indemnité" document. An ineligible result is a
//! hard branch: it renders a single compact reason block and none of the
//! numeric breakdown (amount box, detail table, explanation). Eligible
//! results get the amount box, the contract dates, a detail table whose
//! rows are omitted when semantically absent, the explanation box and a
//! disclaimer.

use crate::doc::{FontStyle, ReportDocument};
use crate::layout::{self, MARGIN, PAGE_WIDTH, TOP_START};
use crate::{render, ExportError};
use report_types::{format_currency, format_date, LicenciementInput, LicenciementResult};
use std::path::{Path, PathBuf};

const INELIGIBLE_BOX_HEIGHT: f64 = 22.0;
const AMOUNT_BOX_HEIGHT: f64 = 28.0;
const TABLE_ROW_HEIGHT: f64 = 7.0;
const EXPLANATION_LINE_HEIGHT: f64 = 4.5;
const DISCLAIMER_BREAK_Y: f64 = 260.0;

const DISCLAIMER: &str = "Document généré par CEGI à titre indicatif uniquement. \
    L'utilisateur est invité à vérifier l'ensemble des données saisies et des résultats \
    obtenus avant toute décision. Ce document ne constitue pas un avis juridique.";

/// Lays out the severance document. Never fails.
pub fn build_licenciement_document(
    result: &LicenciementResult,
    input: &LicenciementInput,
) -> ReportDocument {
    let mut doc = ReportDocument::new();
    let mut y = TOP_START;

    // Title
    doc.set_font(FontStyle::Bold);
    doc.set_font_size(18.0);
    doc.set_text_color(30, 30, 35);
    doc.text("CEGI — Calcul d'indemnité", MARGIN, y);
    y += 7.0;

    doc.set_font(FontStyle::Normal);
    doc.set_font_size(9.0);
    doc.set_text_color(110, 110, 120);
    let today = chrono::Local::now().format("%d/%m/%Y");
    doc.text(
        &format!("Type : {}   |   Généré le {}", result.type_rupture.label(), today),
        MARGIN,
        y,
    );
    y += 10.0;

    if !result.eligible {
        ineligible_block(&mut doc, result, &mut y);
        disclaimer_block(&mut doc, &mut y);
        return doc;
    }

    amount_block(&mut doc, result, &mut y);
    dates_row(&mut doc, input, &mut y);
    detail_table(&mut doc, result, &mut y);
    explanation_block(&mut doc, result, &mut y);
    disclaimer_block(&mut doc, &mut y);
    doc
}

fn ineligible_block(doc: &mut ReportDocument, result: &LicenciementResult, y: &mut f64) {
    let content_w = layout::CONTENT_WIDTH;
    doc.set_fill_color(255, 245, 245);
    doc.set_draw_color(239, 68, 68);
    doc.rounded_rect(MARGIN, *y, content_w, INELIGIBLE_BOX_HEIGHT, 3.0);

    doc.set_font(FontStyle::Bold);
    doc.set_font_size(10.0);
    doc.set_text_color(185, 28, 28);
    doc.text("Non éligible à l'indemnité", MARGIN + 4.0, *y + 8.0);

    doc.set_font(FontStyle::Normal);
    doc.set_font_size(8.5);
    doc.set_text_color(100, 40, 40);
    let reason = result.raison_ineligibilite.as_deref().unwrap_or("");
    doc.text_wrapped(reason, MARGIN + 4.0, *y + 15.0, content_w - 8.0, 4.0);
    *y += INELIGIBLE_BOX_HEIGHT + 6.0;
}

fn amount_block(doc: &mut ReportDocument, result: &LicenciementResult, y: &mut f64) {
    let content_w = layout::CONTENT_WIDTH;
    doc.set_fill_color(245, 247, 255);
    doc.set_draw_color(200, 205, 240);
    doc.rounded_rect(MARGIN, *y, content_w, AMOUNT_BOX_HEIGHT, 3.0);

    doc.set_font(FontStyle::Normal);
    doc.set_font_size(8.0);
    doc.set_text_color(100, 100, 130);
    doc.text("Indemnité totale", MARGIN + 4.0, *y + 7.0);

    doc.set_font(FontStyle::Bold);
    doc.set_font_size(22.0);
    doc.set_text_color(80, 90, 200);
    doc.text(&format_currency(&result.montant_indemnite), MARGIN + 4.0, *y + 21.0);

    // The minimum note is omitted when it equals the total: rendering both
    // would visually imply a difference that does not exist.
    if result.montant_minimum != result.montant_indemnite {
        doc.set_font(FontStyle::Normal);
        doc.set_font_size(7.5);
        doc.set_text_color(110, 110, 130);
        doc.text_right(
            &format!(
                "dont minimum légal/conv. : {}",
                format_currency(&result.montant_minimum)
            ),
            PAGE_WIDTH - MARGIN - 4.0,
            *y + 21.0,
        );
    }
    *y += AMOUNT_BOX_HEIGHT + 6.0;
}

fn dates_row(doc: &mut ReportDocument, input: &LicenciementInput, y: &mut f64) {
    let mut rows: Vec<(&str, String)> = vec![(
        "Date d'entrée",
        format_date(Some(input.date_entree.as_str())),
    )];
    if let Some(notif) = &input.date_notification {
        rows.push(("Date de notification", format_date(Some(notif))));
    }
    rows.push((
        "Date de fin de contrat",
        format_date(Some(input.date_fin_contrat.as_str())),
    ));

    doc.set_font(FontStyle::Normal);
    doc.set_font_size(8.0);
    doc.set_text_color(110, 110, 120);
    let line = rows
        .iter()
        .map(|(label, value)| format!("{label} : {value}"))
        .collect::<Vec<_>>()
        .join("   |   ");
    doc.text(&line, MARGIN, *y);
    *y += 8.0;
}

/// Detail rows, in display order, with the conditional-omission rules: a
/// field that is null, zero-meaning-absent, or equal to its companion
/// minimum is dropped entirely rather than rendered empty.
fn detail_rows(result: &LicenciementResult) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = vec![
        (
            "Salaire de référence".to_string(),
            format_currency(&result.salaire_reference),
        ),
        ("Méthode".to_string(), result.methode_label().to_string()),
        (
            "Ancienneté retenue".to_string(),
            format!(
                "{} mois ({} ans)",
                result.anciennete_retenue_mois, result.anciennete_retenue_annees
            ),
        ),
    ];
    if result.preavis_mois > 0 {
        rows.push((
            "Préavis inclus".to_string(),
            format!("{} mois", result.preavis_mois),
        ));
    }
    rows.push((
        "Indemnité légale".to_string(),
        format_currency(&result.indemnite_legale),
    ));
    if let Some(conventionnelle) = &result.indemnite_conventionnelle {
        rows.push((
            "Indemnité conventionnelle".to_string(),
            format_currency(conventionnelle),
        ));
    }
    // Unparseable multipliers are shown: hiding them would hide data.
    let is_unit_multiplier = result
        .multiplicateur
        .trim()
        .parse::<f64>()
        .map(|v| v == 1.0)
        .unwrap_or(false);
    if !is_unit_multiplier {
        rows.push((
            "Multiplicateur".to_string(),
            format!("× {}", result.multiplicateur),
        ));
    }
    let supralegale_positive = result
        .indemnite_supralegale
        .trim()
        .parse::<f64>()
        .map(|v| v > 0.0)
        .unwrap_or(false);
    if supralegale_positive {
        rows.push((
            "Supralégal négocié".to_string(),
            format_currency(&result.indemnite_supralegale),
        ));
    }
    if result.plafond_applique {
        if let Some(description) = &result.plafond_description {
            rows.push(("Plafond appliqué".to_string(), description.clone()));
        }
    }
    rows
}

fn detail_table(doc: &mut ReportDocument, result: &LicenciementResult, y: &mut f64) {
    let content_w = layout::CONTENT_WIDTH;
    let rows = detail_rows(result);
    let table_h = 9.0 + rows.len() as f64 * TABLE_ROW_HEIGHT;
    layout::ensure_space(doc, y, table_h);

    doc.set_fill_color(245, 245, 250);
    doc.set_draw_color(215, 215, 225);
    doc.rounded_rect(MARGIN, *y, content_w, table_h, 3.0);

    doc.set_font(FontStyle::Bold);
    doc.set_font_size(9.0);
    doc.set_text_color(40, 40, 50);
    doc.text("Détail du calcul", MARGIN + 4.0, *y + 6.0);
    *y += 10.0;

    for (label, value) in &rows {
        doc.set_font(FontStyle::Normal);
        doc.set_font_size(8.5);
        doc.set_text_color(90, 90, 100);
        doc.text(label, MARGIN + 4.0, *y);

        doc.set_font(FontStyle::Bold);
        doc.set_text_color(30, 30, 35);
        doc.text_right(value, PAGE_WIDTH - MARGIN - 4.0, *y);
        *y += TABLE_ROW_HEIGHT;
    }
    *y += 6.0;
}

fn explanation_block(doc: &mut ReportDocument, result: &LicenciementResult, y: &mut f64) {
    let content_w = layout::CONTENT_WIDTH;
    let lines = layout::split_text_to_size(&result.explication, content_w - 8.0, 8.0);
    let block_h = lines.len() as f64 * EXPLANATION_LINE_HEIGHT + 12.0;
    layout::ensure_space(doc, y, block_h);

    doc.set_fill_color(248, 248, 255);
    doc.set_draw_color(200, 205, 240);
    doc.rounded_rect(MARGIN, *y, content_w, block_h, 3.0);

    doc.set_font(FontStyle::Bold);
    doc.set_font_size(9.0);
    doc.set_text_color(80, 90, 200);
    doc.text("Explication", MARGIN + 4.0, *y + 6.0);

    doc.set_font(FontStyle::Normal);
    doc.set_font_size(8.0);
    doc.set_text_color(60, 60, 80);
    doc.text_lines(&lines, MARGIN + 4.0, *y + 11.0, EXPLANATION_LINE_HEIGHT);
    *y += block_h + 8.0;
}

fn disclaimer_block(doc: &mut ReportDocument, y: &mut f64) {
    let content_w = layout::CONTENT_WIDTH;
    // The disclaimer is short and bounded; the fixed break threshold is a
    // conservative stand-in for its exact height.
    if *y > DISCLAIMER_BREAK_Y {
        doc.add_page();
        *y = TOP_START;
    }
    doc.set_font(FontStyle::Italic);
    doc.set_font_size(7.5);
    doc.set_text_color(155, 155, 165);
    doc.text_wrapped(DISCLAIMER, MARGIN, *y, content_w, 4.0);
}

/// File name for a generated severance document.
pub fn licenciement_file_name() -> String {
    format!(
        "indemnite-licenciement-{}.pdf",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Renders the severance document to PDF bytes.
pub fn export_licenciement_pdf(
    result: &LicenciementResult,
    input: &LicenciementInput,
) -> Result<Vec<u8>, ExportError> {
    let document = build_licenciement_document(result, input);
    tracing::info!(
        pages = document.page_count(),
        eligible = result.eligible,
        "severance document laid out"
    );
    render::render(&document)
}

/// Renders the severance document and writes it under `dir` with a
/// timestamped name.
pub fn save_licenciement_pdf(
    result: &LicenciementResult,
    input: &LicenciementInput,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = export_licenciement_pdf(result, input)?;
    let path = dir.join(licenciement_file_name());
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "severance document saved");
    Ok(path)
}
