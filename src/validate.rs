//! URL input validation
//!
//! Runs before any request is built: an input that fails here never reaches
//! the network.

use url::Url;

use crate::error::ValidationError;

/// Trim the raw input and check it parses as an absolute URL
pub fn validate_scan_input(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    Url::parse(trimmed).map_err(|e| ValidationError::Malformed(e.to_string()))
}

/// Whether a URL is worth prefilling into a scan form (`http`/`https` only)
pub fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
