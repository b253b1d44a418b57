//! Shared report types and display formatting
//!
//! This crate defines the wire shapes exchanged with the CEGI analysis
//! service (payslip check reports, severance computation inputs/results,
//! payslip PDF extraction) and the locale formatting helpers used by both
//! the preview renderer and the PDF export path.
//!
//! Field names and nullability mirror the service contract exactly: the
//! layout code branches on `null` vs. zero vs. sentinel values, so these
//! shapes are load-bearing.

pub mod format;
pub mod licenciement;
pub mod types;

pub use format::{format_currency, format_date};
pub use licenciement::{
    ConventionCollective, LicenciementInput, LicenciementPdfExtraction, LicenciementResult,
    MotifLicenciement, PeriodeTravail, SalaireMensuel, TypeRupture,
};
pub use types::{ApiParams, CheckReport, CheckResult};
