use serde::{Deserialize, Serialize};

/// Result of a single payslip verification check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub test_name: String,
    pub valid: bool,
    /// True when the failure points at a specific line of the payslip.
    pub is_line_error: bool,
    /// Label of the flagged payslip line, when the service located one.
    /// Not guaranteed unique, nor guaranteed to appear verbatim in the
    /// rendered document.
    pub line_number: Option<String>,
    pub obtained_value: Option<String>,
    pub expected_value: Option<String>,
    pub difference: Option<String>,
    pub message: String,
}

/// Aggregate verification report returned by the check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub source_file: Option<String>,
    pub extraction_success: bool,
    pub checks: Vec<CheckResult>,
    pub all_valid: bool,
    pub total_checks: u32,
    pub passed_checks: u32,
    pub failed_checks: u32,
}

impl CheckReport {
    /// Checks that failed, in report order.
    pub fn failing_checks(&self) -> Vec<&CheckResult> {
        self.checks.iter().filter(|c| !c.valid).collect()
    }

    /// Line labels to highlight in the preview: failed checks that carry a
    /// line-level location.
    pub fn error_line_numbers(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| !c.valid && c.is_line_error)
            .filter_map(|c| c.line_number.clone())
            .collect()
    }

    /// Validates the precomputed counters against the check list.
    pub fn is_consistent(&self) -> bool {
        let failed = self.checks.iter().filter(|c| !c.valid).count() as u32;
        self.total_checks == self.passed_checks + self.failed_checks
            && self.failed_checks == failed
            && self.all_valid == (failed == 0)
    }
}

/// Parameters forwarded to the check endpoint alongside the payslip file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiParams {
    pub smic_mensuel: f64,
    pub effectif_50_et_plus: bool,
    pub plafond_ss: f64,
    pub include_frappe_check: bool,
    pub include_analyse_llm: bool,
}

impl Default for ApiParams {
    fn default() -> Self {
        Self {
            smic_mensuel: 1801.80,
            effectif_50_et_plus: false,
            plafond_ss: 3925.0,
            include_frappe_check: true,
            include_analyse_llm: false,
        }
    }
}
