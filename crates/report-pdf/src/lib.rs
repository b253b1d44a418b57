//! Report PDF synthesis
//!
//! Builds the downloadable CEGI documents: the payslip verification report
//! and the severance computation summary. Layout is computed in
//! millimetres against a fixed A4 page with fixed margins — each content
//! block's height is estimated before placement and a block that does not
//! fit starts a new page, so no block ever straddles a page boundary. The
//! result is a paginated list of draw instructions, serialized to PDF only
//! after layout fully completes.

pub mod doc;
pub mod export;
pub mod layout;
pub mod licenciement;
pub mod render;

pub use doc::{Color, DrawOp, FontStyle, ReportDocument, TextAlign};
pub use export::{build_report_document, export_report, report_file_name, save_report};
pub use licenciement::{
    build_licenciement_document, export_licenciement_pdf, licenciement_file_name,
    save_licenciement_pdf,
};

use thiserror::Error;

/// Errors raised while serializing or saving an export document. Layout
/// itself is infallible: degenerate input still yields a minimal valid
/// document.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode PDF content: {0}")]
    ContentError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
