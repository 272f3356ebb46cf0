//! Error types for the WeMeeting SDK.

use serde_json::Value;
use thiserror::Error;

/// Main error type for the WeMeeting SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter is missing or out of range.
    ///
    /// Always raised before any network call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP method outside the GET/POST/PUT/DELETE whitelist
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Vendor error payload carried inside a decoded response.
///
/// The API reports failures as `{"error_info": {"error_code": .., "message": ..}}`.
/// The SDK returns such bodies to the caller untouched; this type is a
/// convenience for callers that want to branch on the vendor code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Vendor error code
    pub error_code: i64,
    /// Vendor error message
    pub message: String,
    /// Optional sub-code some endpoints attach
    pub new_error_code: Option<i64>,
}

impl ErrorInfo {
    /// Extract the vendor error from a decoded response, if it carries one.
    #[must_use]
    pub fn from_response(response: &Value) -> Option<Self> {
        let info = response.get("error_info")?;
        let error_code = info.get("error_code").and_then(Value::as_i64)?;
        let message = info
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let new_error_code = info.get("new_error_code").and_then(Value::as_i64);

        Some(Self {
            error_code,
            message,
            new_error_code,
        })
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_code, self.message)
    }
}
