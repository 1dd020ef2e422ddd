//! Wire types for the scan backend
//!
//! This module defines the request and response bodies exchanged with the
//! classification backend:
//! - `ScanRequest` / `ScanResult`: one scan round-trip
//! - `Verdict`: the classification, tolerant of unknown values
//! - `Stats`: aggregate counters from `/api/stats`

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::prefs::Theme;

/// Body of `POST /api/scan`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRequest {
    pub url: String,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Classification returned by the backend
///
/// Any status outside the three known values decodes to `Unknown` so the
/// renderer can show an error state instead of failing the whole response.
/// That includes non-string, `null` and missing statuses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Verdict {
    Safe,
    Suspicious,
    Dangerous,
    Unknown(String),
}

/// A missing status
impl Default for Verdict {
    fn default() -> Self {
        Verdict::Unknown(String::new())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => Verdict::from(raw),
            Value::Null => Verdict::default(),
            other => Verdict::Unknown(other.to_string()),
        })
    }
}

impl Verdict {
    /// The three verdicts the backend is expected to produce
    pub const KNOWN: [Verdict; 3] = [Verdict::Safe, Verdict::Suspicious, Verdict::Dangerous];

    /// Wire name of the verdict
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Suspicious => "suspicious",
            Verdict::Dangerous => "dangerous",
            Verdict::Unknown(raw) => raw,
        }
    }

    /// Human-readable label for lists and badges
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::Suspicious => "Suspicious",
            Verdict::Dangerous => "Dangerous",
            Verdict::Unknown(_) => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Verdict::Unknown(_))
    }

    /// Whether this verdict counts as a blocked threat
    pub fn is_threat(&self) -> bool {
        matches!(self, Verdict::Dangerous)
    }
}

impl From<String> for Verdict {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "safe" => Verdict::Safe,
            "suspicious" => Verdict::Suspicious,
            "dangerous" => Verdict::Dangerous,
            _ => Verdict::Unknown(raw),
        }
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `POST /api/scan`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    #[serde(default)]
    pub status: Verdict,
    #[serde(default)]
    pub message: String,
    /// Confidence in `[0, 1]`
    #[serde(default)]
    pub confidence: f64,
    /// Extracted features in backend order
    #[serde(default)]
    pub features: Map<String, Value>,
    /// Signed per-feature contribution scores
    #[serde(default)]
    pub shap_values: Map<String, Value>,
}

impl ScanResult {
    /// SHAP values that are numeric, in backend order
    pub fn shap(&self) -> Vec<(&str, f64)> {
        self.shap_values
            .iter()
            .filter_map(|(name, value)| match value.as_f64() {
                Some(v) => Some((name.as_str(), v)),
                None => {
                    tracing::debug!(feature = %name, "Skipping non-numeric SHAP value");
                    None
                }
            })
            .collect()
    }
}

/// Response of `GET /api/stats`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    #[serde(default)]
    pub total_scans: u64,
    #[serde(default)]
    pub threats_blocked: u64,
}

/// Body of `POST /api/theme`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeUpdate {
    pub theme: Theme,
}

/// Response of `POST /api/clear-history`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClearHistoryResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ClearHistoryResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Error body the backend sends with 4xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_wire() {
        let result: ScanResult = serde_json::from_str(
            r#"{"status": "dangerous", "message": "bad", "confidence": 0.98,
                "features": {}, "shap_values": {}}"#,
        )
        .unwrap();
        assert_eq!(result.status, Verdict::Dangerous);
        assert!(result.status.is_threat());
    }

    #[test]
    fn test_unknown_verdict_is_not_fatal() {
        let result: ScanResult =
            serde_json::from_str(r#"{"status": "maybe", "message": "?"}"#).unwrap();
        assert_eq!(result.status, Verdict::Unknown("maybe".to_string()));
        assert!(!result.status.is_known());
        assert_eq!(result.confidence, 0.0);
        assert!(result.features.is_empty());
    }

    #[test]
    fn test_non_string_status_is_unknown() {
        for body in [
            r#"{"status": null, "confidence": 0.4}"#,
            r#"{"status": 3, "confidence": 0.4}"#,
            r#"{"confidence": 0.4}"#,
        ] {
            let result: ScanResult = serde_json::from_str(body).unwrap();
            assert!(!result.status.is_known(), "{body}");
            assert_eq!(result.confidence, 0.4);
        }

        let result: ScanResult = serde_json::from_str(r#"{"status": 3}"#).unwrap();
        assert_eq!(result.status, Verdict::Unknown("3".to_string()));
    }

    #[test]
    fn test_features_keep_backend_order() {
        let result: ScanResult = serde_json::from_str(
            r#"{"status": "safe", "features": {"zeta": 1, "alpha": 2, "mid": 3}}"#,
        )
        .unwrap();
        let keys: Vec<_> = result.features.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_shap_skips_non_numeric() {
        let result: ScanResult = serde_json::from_str(
            r#"{"status": "safe", "shap_values": {"https": 0.25, "note": "n/a", "dns": -0.2}}"#,
        )
        .unwrap();
        assert_eq!(result.shap(), vec![("https", 0.25), ("dns", -0.2)]);
    }

    #[test]
    fn test_theme_update_body() {
        let body = serde_json::to_string(&ThemeUpdate { theme: Theme::Dark }).unwrap();
        assert_eq!(body, r#"{"theme":"dark"}"#);
    }

    #[test]
    fn test_clear_history_response() {
        let ok: ClearHistoryResponse =
            serde_json::from_str(r#"{"status": "success", "message": "History cleared"}"#).unwrap();
        assert!(ok.is_success());

        let failed: ClearHistoryResponse = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert!(!failed.is_success());
    }
}
