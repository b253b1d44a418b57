//! PDF text extraction.
//!
//! Extracts the text of an uploaded payslip page by page. `pdf-extract`
//! does not expose page boundaries directly, so pages are recovered from
//! form feed separators in the extracted text.

use crate::PreviewError;
use pdf_extract::extract_text_from_mem;
use serde::{Deserialize, Serialize};

/// Minimum non-whitespace characters below which a document is treated as
/// scanned (image-only) rather than text-based.
const SCANNED_TEXT_THRESHOLD: usize = 20;

/// A decoded payslip document: per-page text, ready for token rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page by 1-based number, as displayed in the pager.
    pub fn page(&self, number: usize) -> Option<&PageContent> {
        self.pages.get(number.checked_sub(1)?)
    }
}

/// Text content of a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    /// Lines of text, in reading order.
    pub lines: Vec<String>,
}

/// Payslip PDF extraction entry point.
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extracts page-separated text from raw PDF bytes.
    ///
    /// # Errors
    /// - [`PreviewError::PasswordProtected`] for encrypted files
    /// - [`PreviewError::InvalidPdf`] for malformed files
    /// - [`PreviewError::ScannedPdf`] when no meaningful text is present
    /// - [`PreviewError::ExtractionError`] for other extraction failures
    pub fn extract_text(pdf_bytes: &[u8]) -> Result<ExtractedDocument, PreviewError> {
        let raw_text = match extract_text_from_mem(pdf_bytes) {
            Ok(text) => text,
            Err(e) => return Err(Self::classify_error(e)),
        };

        let non_whitespace = raw_text.chars().filter(|c| !c.is_whitespace()).count();
        if non_whitespace < SCANNED_TEXT_THRESHOLD {
            return Err(PreviewError::ScannedPdf);
        }

        let pages = Self::split_pages(&raw_text);
        if pages.is_empty() {
            return Err(PreviewError::ExtractionError(
                "no pages could be extracted".to_string(),
            ));
        }

        tracing::debug!(pages = pages.len(), "payslip text extracted");
        Ok(ExtractedDocument { pages })
    }

    fn classify_error(e: pdf_extract::OutputError) -> PreviewError {
        let msg = e.to_string();
        let lower = msg.to_lowercase();
        if lower.contains("encrypted") || lower.contains("password") {
            PreviewError::PasswordProtected
        } else if lower.contains("invalid") || lower.contains("malformed") || lower.contains("corrupt")
        {
            PreviewError::InvalidPdf(msg)
        } else {
            PreviewError::ExtractionError(msg)
        }
    }

    /// Splits extracted text on form feed page separators. Text without any
    /// form feed is a single page.
    fn split_pages(text: &str) -> Vec<PageContent> {
        text.split('\x0C')
            .filter(|page| !page.trim().is_empty())
            .enumerate()
            .map(|(idx, page_text)| PageContent {
                page_number: idx + 1,
                lines: page_text.lines().map(str::to_string).collect(),
            })
            .collect()
    }
}
