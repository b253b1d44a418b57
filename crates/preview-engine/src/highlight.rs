//! Error-line highlighting.
//!
//! The verification service reports approximate locations as line labels;
//! the rendered document exposes text tokens. The match is a bidirectional
//! substring test: either the token contains the label, or the label
//! contains the trimmed token. This deliberately tolerates tokenization
//! splitting a label across fragments in either direction, at the cost of
//! occasional over-matching (a one-character label matches almost
//! anything). A wrong highlight is a display-quality issue only.

use serde::{Deserialize, Serialize};

/// Hover hint carried by every flagged token.
pub const HIGHLIGHT_TITLE: &str = "Erreur sur cette ligne";

/// A positioned text fragment of one rendered page. Rebuilt on every page
/// render; never kept across page changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderToken {
    /// 1-based page the token belongs to.
    pub page: usize,
    /// 1-based position of the token within the page.
    pub index: usize,
    pub text: String,
}

/// A render token after the highlight decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedToken {
    pub token: RenderToken,
    pub flagged: bool,
}

impl HighlightedToken {
    /// Hover hint for the token: present only when flagged.
    pub fn title(&self) -> Option<&'static str> {
        self.flagged.then_some(HIGHLIGHT_TITLE)
    }
}

/// Decides whether a single token matches any flagged line label.
///
/// A token is flagged iff its trimmed text is non-empty and, for some label,
/// the token contains the label or the label contains the trimmed token.
pub fn is_flagged(token_text: &str, error_lines: &[String]) -> bool {
    let trimmed = token_text.trim();
    if trimmed.is_empty() {
        return false;
    }
    error_lines
        .iter()
        .any(|line| token_text.contains(line.as_str()) || line.contains(trimmed))
}

/// Applies the highlight decision to a page's token set.
///
/// With an empty flagged set every token passes through unflagged (identity
/// fast path). Pure: no state is shared between per-token decisions.
pub fn highlight_tokens(tokens: Vec<RenderToken>, error_lines: &[String]) -> Vec<HighlightedToken> {
    if error_lines.is_empty() {
        return tokens
            .into_iter()
            .map(|token| HighlightedToken { token, flagged: false })
            .collect();
    }
    tokens
        .into_iter()
        .map(|token| {
            let flagged = is_flagged(&token.text, error_lines);
            HighlightedToken { token, flagged }
        })
        .collect()
}
