//! Paged payslip preview.
//!
//! State machine over the pages of one uploaded document. Decode failure is
//! terminal for the viewer instance; recovery is a new upload producing a
//! fresh viewer.

use crate::extract::{ExtractedDocument, PdfExtractor};
use crate::highlight::{highlight_tokens, HighlightedToken, RenderToken};
use report_types::CheckReport;

/// Display state of the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    /// No document selected.
    Empty,
    /// Decode in progress.
    Loading,
    /// Document decoded; `page` is clamped to `1..=num_pages`.
    Ready { page: usize, num_pages: usize },
    /// Decode failed; no further interaction possible.
    Failed(String),
}

/// Drives paged display of an uploaded payslip and per-token highlighting.
#[derive(Debug)]
pub struct PdfViewer {
    state: ViewerState,
    document: Option<ExtractedDocument>,
    error_lines: Vec<String>,
}

impl PdfViewer {
    pub fn new() -> Self {
        Self {
            state: ViewerState::Empty,
            document: None,
            error_lines: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Decodes an uploaded document and lands on page 1.
    ///
    /// On failure the viewer transitions to the terminal `Failed` state with
    /// the decode message; it never auto-retries.
    pub fn load(&mut self, pdf_bytes: &[u8]) {
        self.state = ViewerState::Loading;
        self.document = None;
        match PdfExtractor::extract_text(pdf_bytes) {
            Ok(doc) => self.install(doc),
            Err(e) => {
                tracing::warn!(error = %e, "payslip decode failed");
                self.state = ViewerState::Failed(e.to_string());
            }
        }
    }

    /// Installs an already-decoded document (decode happens elsewhere, e.g.
    /// in tests or off the UI thread).
    pub fn install(&mut self, document: ExtractedDocument) {
        let num_pages = document.page_count();
        self.document = Some(document);
        self.state = ViewerState::Ready { page: 1, num_pages };
    }

    /// Replaces the active set of flagged line labels.
    pub fn set_error_lines(&mut self, lines: Vec<String>) {
        self.error_lines = lines;
    }

    /// Derives the flagged set from a verification report; `None` clears
    /// all highlights (a new upload or a reset run).
    pub fn set_report(&mut self, report: Option<&CheckReport>) {
        self.error_lines = report.map(CheckReport::error_line_numbers).unwrap_or_default();
    }

    pub fn error_lines(&self) -> &[String] {
        &self.error_lines
    }

    /// Moves to the given 1-based page, clamped to the valid range.
    /// Out-of-range requests are clamped, not rejected.
    pub fn go_to_page(&mut self, requested: usize) {
        if let ViewerState::Ready { page, num_pages } = &mut self.state {
            *page = requested.clamp(1, *num_pages);
        }
    }

    pub fn next_page(&mut self) {
        if let ViewerState::Ready { page, .. } = self.state {
            self.go_to_page(page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if let ViewerState::Ready { page, .. } = self.state {
            self.go_to_page(page.saturating_sub(1));
        }
    }

    /// Renders the current page: rebuilds its token set and applies the
    /// highlight decision to each token. Returns an empty set outside the
    /// `Ready` state.
    pub fn page_tokens(&self) -> Vec<HighlightedToken> {
        let ViewerState::Ready { page, .. } = self.state else {
            return Vec::new();
        };
        let Some(content) = self.document.as_ref().and_then(|d| d.page(page)) else {
            return Vec::new();
        };
        let tokens: Vec<RenderToken> = content
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| RenderToken {
                page,
                index: i + 1,
                text: line.clone(),
            })
            .collect();
        highlight_tokens(tokens, &self.error_lines)
    }
}

impl Default for PdfViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PageContent;
    use pretty_assertions::assert_eq;

    fn document(pages: &[&[&str]]) -> ExtractedDocument {
        ExtractedDocument {
            pages: pages
                .iter()
                .enumerate()
                .map(|(i, lines)| PageContent {
                    page_number: i + 1,
                    lines: lines.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let viewer = PdfViewer::new();
        assert_eq!(*viewer.state(), ViewerState::Empty);
        assert!(viewer.page_tokens().is_empty());
    }

    #[test]
    fn test_install_lands_on_page_one() {
        let mut viewer = PdfViewer::new();
        viewer.install(document(&[&["a"], &["b"], &["c"]]));
        assert_eq!(*viewer.state(), ViewerState::Ready { page: 1, num_pages: 3 });
    }

    #[test]
    fn test_navigation_clamps_to_range() {
        let mut viewer = PdfViewer::new();
        viewer.install(document(&[&["a"], &["b"]]));

        viewer.previous_page();
        assert_eq!(*viewer.state(), ViewerState::Ready { page: 1, num_pages: 2 });

        viewer.next_page();
        viewer.next_page();
        viewer.next_page();
        assert_eq!(*viewer.state(), ViewerState::Ready { page: 2, num_pages: 2 });

        viewer.go_to_page(99);
        assert_eq!(*viewer.state(), ViewerState::Ready { page: 2, num_pages: 2 });
        viewer.go_to_page(0);
        assert_eq!(*viewer.state(), ViewerState::Ready { page: 1, num_pages: 2 });
    }

    #[test]
    fn test_decode_failure_is_terminal() {
        let mut viewer = PdfViewer::new();
        viewer.load(b"not a pdf at all");
        assert!(matches!(viewer.state(), ViewerState::Failed(_)));
        viewer.next_page();
        assert!(matches!(viewer.state(), ViewerState::Failed(_)));
        assert!(viewer.page_tokens().is_empty());
    }

    #[test]
    fn test_page_tokens_apply_highlighting() {
        let mut viewer = PdfViewer::new();
        viewer.install(document(&[&["Salaire", "12", "brut"]]));
        viewer.set_error_lines(vec!["12".to_string()]);

        let tokens = viewer.page_tokens();
        let flagged: Vec<_> = tokens.iter().map(|t| t.flagged).collect();
        assert_eq!(flagged, vec![false, true, false]);
    }

    #[test]
    fn test_tokens_rebuilt_per_page() {
        let mut viewer = PdfViewer::new();
        viewer.install(document(&[&["page un"], &["page deux"]]));

        assert_eq!(viewer.page_tokens()[0].token.text, "page un");
        viewer.next_page();
        let tokens = viewer.page_tokens();
        assert_eq!(tokens[0].token.text, "page deux");
        assert_eq!(tokens[0].token.page, 2);
    }

    #[test]
    fn test_set_report_uses_line_level_failures_only() {
        use report_types::CheckResult;

        let mut viewer = PdfViewer::new();
        viewer.install(document(&[&["Salaire", "12", "brut"]]));
        let report = CheckReport {
            source_file: None,
            extraction_success: true,
            checks: vec![CheckResult {
                test_name: "net_a_payer".to_string(),
                valid: false,
                is_line_error: true,
                line_number: Some("12".to_string()),
                obtained_value: None,
                expected_value: None,
                difference: None,
                message: String::new(),
            }],
            all_valid: false,
            total_checks: 1,
            passed_checks: 0,
            failed_checks: 1,
        };

        viewer.set_report(Some(&report));
        assert!(viewer.page_tokens()[1].flagged);

        viewer.set_report(None);
        assert!(viewer.page_tokens().iter().all(|t| !t.flagged));
    }

    #[test]
    fn test_replacing_error_lines_changes_decision() {
        let mut viewer = PdfViewer::new();
        viewer.install(document(&[&["Net à payer 1950,00"]]));

        viewer.set_error_lines(vec!["1950,00".to_string()]);
        assert!(viewer.page_tokens()[0].flagged);

        viewer.set_error_lines(Vec::new());
        assert!(!viewer.page_tokens()[0].flagged);
    }
}
