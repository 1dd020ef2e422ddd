//! Scan backend client
//!
//! The `ScanApi` trait is the seam between the scan flow and the transport:
//! the terminal client implements it with `reqwest` (`native` feature), the
//! web UI and the extension with `gloo-net` (`web` feature), and tests with
//! an in-process fake.

use async_trait::async_trait;

use crate::error::{ApiResult, ScanError};
use crate::model::{ApiErrorBody, ClearHistoryResponse, ScanRequest, ScanResult, Stats};
use crate::prefs::Theme;

#[cfg(feature = "native")]
pub mod http;

#[cfg(feature = "native")]
pub use http::HttpScanApi;

#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "web")]
pub use web::WebScanApi;

/// Backend origin used by the browser extension, which runs outside the
/// page origin
pub const DEFAULT_EXTENSION_API_BASE: &str = "http://localhost:5000";

/// Backend origin used by the terminal client
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Operations the classification backend exposes
///
/// Futures are not `Send`: in the browser they wrap JS promises.
#[async_trait(?Send)]
pub trait ScanApi {
    /// `POST /api/scan`
    async fn scan(&self, request: &ScanRequest) -> ApiResult<ScanResult>;

    /// `GET /api/stats`
    async fn stats(&self) -> ApiResult<Stats>;

    /// `POST /api/theme`; callers treat failures as best-effort
    async fn set_theme(&self, theme: Theme) -> ApiResult<()>;

    /// `POST /api/clear-history`
    async fn clear_history(&self) -> ApiResult<ClearHistoryResponse>;
}

/// URLs of every backend endpoint under one origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` is an origin such as `http://localhost:5000`, or empty for
    /// same-origin relative URLs
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn scan(&self) -> String {
        format!("{}/api/scan", self.base)
    }

    pub fn stats(&self) -> String {
        format!("{}/api/stats", self.base)
    }

    pub fn theme(&self) -> String {
        format!("{}/api/theme", self.base)
    }

    pub fn clear_history(&self) -> String {
        format!("{}/api/clear-history", self.base)
    }

    /// Page the extension's context-menu entry opens
    pub fn scanner_page(&self, target_url: &str) -> String {
        format!(
            "{}/scanner?url={}",
            self.base,
            urlencoding::encode(target_url)
        )
    }
}

/// Build the error for a non-2xx response
///
/// Uses the backend's `{"error": ...}` body when present, the raw text
/// otherwise.
pub fn http_error(status: u16, body: &str) -> ScanError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            let text = body.trim();
            if text.is_empty() {
                "Unknown error".to_string()
            } else {
                text.chars().take(200).collect()
            }
        });
    ScanError::Http { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_same_origin() {
        let endpoints = Endpoints::new("");
        assert_eq!(endpoints.scan(), "/api/scan");
        assert_eq!(endpoints.stats(), "/api/stats");
    }

    #[test]
    fn test_endpoints_absolute_origin() {
        let endpoints = Endpoints::new(" http://localhost:5000/ ");
        assert_eq!(endpoints.base(), "http://localhost:5000");
        assert_eq!(endpoints.theme(), "http://localhost:5000/api/theme");
        assert_eq!(endpoints.clear_history(), "http://localhost:5000/api/clear-history");
    }

    #[test]
    fn test_scanner_page_encodes_target() {
        let endpoints = Endpoints::new(DEFAULT_EXTENSION_API_BASE);
        assert_eq!(
            endpoints.scanner_page("https://evil.test/a?b=c&d"),
            "http://localhost:5000/scanner?url=https%3A%2F%2Fevil.test%2Fa%3Fb%3Dc%26d"
        );
    }

    #[test]
    fn test_http_error_body() {
        let err = http_error(400, r#"{"error": "No URL provided"}"#);
        assert_eq!(
            err,
            ScanError::Http {
                status: 400,
                message: "No URL provided".to_string()
            }
        );

        let err = http_error(500, "");
        assert_eq!(err.to_string(), "API error 500: Unknown error");
    }
}
