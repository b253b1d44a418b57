//! Payslip preview engine
//!
//! Turns an uploaded payslip PDF into pages of text tokens and decorates
//! each token with an error highlight when it matches a line flagged by the
//! verification report.
//!
//! The matcher and token decoration are pure, synchronous computations; the
//! only asynchronous-looking step in the pipeline is the initial document
//! decode, which is terminal on failure (a new upload creates a fresh
//! viewer).

pub mod extract;
pub mod highlight;
pub mod viewer;

pub use extract::{ExtractedDocument, PageContent, PdfExtractor};
pub use highlight::{highlight_tokens, HighlightedToken, RenderToken, HIGHLIGHT_TITLE};
pub use viewer::{PdfViewer, ViewerState};

use thiserror::Error;

/// Errors raised while decoding an uploaded payslip PDF.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("PDF extraction failed: {0}")]
    ExtractionError(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("Scanned PDF detected - no extractable text")]
    ScannedPdf,
}
