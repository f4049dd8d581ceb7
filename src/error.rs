//! UI Error Types
//!
//! Every fallible operation in the enhancers returns `UiResult`. Event handlers
//! are the boundary where errors become notices or log lines.

use thiserror::Error;

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    /// Request never produced a usable HTTP response
    #[error("network error: {0}")]
    Network(String),

    /// Response body was not the expected JSON shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Server answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("CEP inválido")]
    InvalidPostalCode,

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("shipping has not been calculated")]
    ShippingNotCalculated,

    /// Another tab saved a newer draft than the one this tab started from
    #[error("draft changed elsewhere (stored v{stored}, expected v{expected})")]
    DraftConflict { stored: u64, expected: u64 },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl UiError {
    /// Message for the user, falling back to `generic` for transport-level failures
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            UiError::Rejected(msg) if !msg.is_empty() => msg.clone(),
            UiError::Rejected(_) | UiError::Network(_) | UiError::Decode(_) => generic.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for UiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UiError::Decode(err.to_string())
        } else {
            UiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Decode(err.to_string())
    }
}
