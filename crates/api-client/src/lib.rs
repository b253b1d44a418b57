//! Client for the CEGI analysis service.
//!
//! All business rules (payslip checks, severance computation, payslip
//! extraction) run remotely; this crate only moves typed payloads across
//! the boundary and logs every call. Request and response shapes live in
//! `report-types`.

use report_types::{ApiParams, CheckReport, LicenciementInput, LicenciementPdfExtraction,
    LicenciementResult};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Server unreachable, CORS, TLS, or a body that failed to decode.
    #[error("Impossible de joindre l'API ({0})")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status, with the `detail` field of the JSON error
    /// body when the server provided one.
    #[error("HTTP {status} — {detail}")]
    Http { status: u16, detail: String },
}

/// Typed client over the three service endpoints.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Uploads a payslip and the check parameters; returns the verification
    /// report.
    pub async fn check_payslip(
        &self,
        api_url: &str,
        file_name: &str,
        pdf_bytes: Vec<u8>,
        params: &ApiParams,
    ) -> Result<CheckReport, ApiError> {
        tracing::info!(url = api_url, file = file_name, size = pdf_bytes.len(), "POST check");
        let form = Form::new()
            .part(
                "file",
                Part::bytes(pdf_bytes)
                    .file_name(file_name.to_string())
                    .mime_str("application/pdf")?,
            )
            .text("smic_mensuel", params.smic_mensuel.to_string())
            .text("effectif_50_et_plus", params.effectif_50_et_plus.to_string())
            .text("plafond_ss", params.plafond_ss.to_string())
            .text("include_frappe_check", params.include_frappe_check.to_string());

        let res = self.http.post(api_url).multipart(form).send().await?;
        handle_response(res).await
    }

    /// Submits a severance computation request.
    pub async fn calculer_licenciement(
        &self,
        api_url: &str,
        input: &LicenciementInput,
    ) -> Result<LicenciementResult, ApiError> {
        tracing::info!(url = api_url, "POST licenciement");
        let res = self.http.post(api_url).json(input).send().await?;
        handle_response(res).await
    }

    /// Uploads a payslip bundle for form prefill extraction.
    pub async fn extraire_depuis_pdf(
        &self,
        api_url: &str,
        file_name: &str,
        pdf_bytes: Vec<u8>,
    ) -> Result<LicenciementPdfExtraction, ApiError> {
        tracing::info!(url = api_url, file = file_name, size = pdf_bytes.len(), "POST licenciementpdf");
        let form = Form::new().part(
            "file",
            Part::bytes(pdf_bytes)
                .file_name(file_name.to_string())
                .mime_str("application/pdf")?,
        );
        let res = self.http.post(api_url).multipart(form).send().await?;
        handle_response(res).await
    }
}

async fn handle_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
    let status = res.status();
    tracing::debug!(status = status.as_u16(), "service response");
    if !status.is_success() {
        let body = res.json::<serde_json::Value>().await.ok();
        let detail = error_detail(status.as_u16(), body.as_ref());
        tracing::error!(status = status.as_u16(), detail = %detail, "service call failed");
        return Err(ApiError::Http {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(res.json().await?)
}

/// Picks the most specific error message available: the JSON `detail`
/// field, else the status reason, else the bare code.
fn error_detail(status: u16, body: Option<&serde_json::Value>) -> String {
    body.and_then(|b| b.get("detail"))
        .and_then(|d| d.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("erreur inconnue")
                .to_string()
        })
}
