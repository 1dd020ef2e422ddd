//! Error types
//!
//! Every error in the scan flow is recovered at the UI boundary: validation
//! failures block the request, network failures leave stats stale, and
//! neither ever propagates beyond the user action that triggered it.

use thiserror::Error;

/// Input that cannot be submitted for scanning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing left after trimming
    #[error("Please enter a URL to scan")]
    Empty,

    /// Not a well-formed absolute URL
    #[error("Please enter a valid URL: {0}")]
    Malformed(String),
}

/// Errors that can occur while running a scan
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    /// Input rejected before any request was issued
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A scan is already outstanding for this controller
    #[error("A scan is already in progress")]
    Busy,

    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ScanError {
    /// Whether the request was blocked before reaching the network
    pub fn is_validation(&self) -> bool {
        matches!(self, ScanError::Validation(_))
    }

    /// Text shown in the error toast
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Validation(e) => e.to_string(),
            ScanError::Busy => "Please wait for the current scan to finish".to_string(),
            ScanError::Network(_) => {
                "Could not reach the scan service. Please try again.".to_string()
            }
            ScanError::Http { status, .. } => {
                format!("Scan failed (server returned {}). Please try again.", status)
            }
            ScanError::Decode(_) => "Received an unreadable response from the scan service".to_string(),
        }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Decode(err.to_string())
    }
}

/// Result type for backend API operations
pub type ApiResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScanError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error 500: boom");

        let err: ScanError = ValidationError::Empty.into();
        assert_eq!(err.to_string(), "Validation error: Please enter a URL to scan");
        assert!(err.is_validation());
    }

    #[test]
    fn test_user_message_hides_internals() {
        let err = ScanError::Network("connection refused (os error 111)".to_string());
        assert!(!err.user_message().contains("os error"));

        let err = ScanError::Http {
            status: 503,
            message: "<html>".to_string(),
        };
        assert!(err.user_message().contains("503"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ScanError = json_err.into();
        assert!(matches!(err, ScanError::Decode(_)));
    }
}
