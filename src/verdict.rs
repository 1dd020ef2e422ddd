//! Verdict rendering
//!
//! Turns a `ScanResult` into everything the verdict panel displays. Both the
//! web UI and the terminal client render from a `VerdictView`, so styling,
//! number formatting and SHAP scaling are decided in one place.

use serde_json::Value;

use crate::model::{ScanResult, Verdict};

/// Styling applied to the verdict panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusStyle {
    /// `safe`
    Positive,
    /// `suspicious`
    Warning,
    /// `dangerous`
    Negative,
    /// anything else the backend sent
    Unknown,
}

impl StatusStyle {
    pub fn for_verdict(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Safe => StatusStyle::Positive,
            Verdict::Suspicious => StatusStyle::Warning,
            Verdict::Dangerous => StatusStyle::Negative,
            Verdict::Unknown(_) => StatusStyle::Unknown,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusStyle::Positive => "status-safe",
            StatusStyle::Warning => "status-suspicious",
            StatusStyle::Negative => "status-dangerous",
            StatusStyle::Unknown => "status-unknown",
        }
    }

    /// All status classes, for code that needs to strip them
    pub const ALL_CLASSES: [&'static str; 4] = [
        "status-safe",
        "status-suspicious",
        "status-dangerous",
        "status-unknown",
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            StatusStyle::Positive => "✓",
            StatusStyle::Warning => "⚠",
            StatusStyle::Negative => "✕",
            StatusStyle::Unknown => "?",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatusStyle::Positive => "Safe URL",
            StatusStyle::Warning => "Suspicious URL",
            StatusStyle::Negative => "Dangerous URL",
            StatusStyle::Unknown => "Unknown Result",
        }
    }
}

/// One row of the feature list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub label: String,
    pub value: String,
}

impl FeatureRow {
    /// `"label: value"`, as shown in lists and the terminal
    pub fn line(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Sign of a SHAP contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapDirection {
    Positive,
    Negative,
}

impl ShapDirection {
    pub fn css_class(&self) -> &'static str {
        match self {
            ShapDirection::Positive => "shap-positive",
            ShapDirection::Negative => "shap-negative",
        }
    }
}

/// One horizontal SHAP bar
#[derive(Debug, Clone, PartialEq)]
pub struct ShapBar {
    pub label: String,
    pub value: f64,
    /// Bar length in percent of the track, in `[0, 100]`
    pub width_pct: f64,
    pub direction: ShapDirection,
}

impl ShapBar {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            label: humanize_feature_name(name),
            value,
            width_pct: shap_width_pct(value),
            direction: if value < 0.0 {
                ShapDirection::Negative
            } else {
                ShapDirection::Positive
            },
        }
    }

    /// Signed value with two decimals
    pub fn value_text(&self) -> String {
        format!("{:+.2}", self.value)
    }
}

/// Everything the verdict panel shows for one scan
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictView {
    pub url: String,
    pub verdict: Verdict,
    pub style: StatusStyle,
    pub message: String,
    pub confidence_text: String,
    pub features: Vec<FeatureRow>,
    pub shap_bars: Vec<ShapBar>,
}

impl VerdictView {
    pub fn from_result(url: &str, result: &ScanResult) -> Self {
        let style = StatusStyle::for_verdict(&result.status);
        if style == StatusStyle::Unknown {
            tracing::warn!(status = %result.status, "Backend returned an unexpected verdict");
        }

        let features = result
            .features
            .iter()
            .map(|(name, value)| FeatureRow {
                label: humanize_feature_name(name),
                value: display_value(value),
            })
            .collect();

        let shap_bars = result
            .shap()
            .into_iter()
            .map(|(name, value)| ShapBar::new(name, value))
            .collect();

        Self {
            url: url.to_string(),
            verdict: result.status.clone(),
            style,
            message: result.message.clone(),
            confidence_text: format_confidence(result.confidence),
            features,
            shap_bars,
        }
    }

    pub fn title(&self) -> &'static str {
        self.style.title()
    }

    /// Class list for the panel; carries exactly one status class
    pub fn panel_class(&self) -> String {
        format!("verdict-panel {}", self.style.css_class())
    }
}

/// `round(c * 100, 2)` with two decimals and a percent sign
pub fn format_confidence(confidence: f64) -> String {
    let pct = (confidence * 100.0 * 100.0).round() / 100.0;
    format!("{:.2}%", pct)
}

/// Bar length for a SHAP value, capped at 100%
pub fn shap_width_pct(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value.abs() * 100.0).min(100.0)
}

/// `domain_age` -> `domain age`
pub fn humanize_feature_name(name: &str) -> String {
    name.replace('_', " ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(json: &str) -> ScanResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_safe_example_scenario() {
        let r = result(
            r#"{"status": "safe", "message": "ok", "confidence": 0.97,
                "features": {"a": 1}, "shap_values": {"a": 0.3}}"#,
        );
        let view = VerdictView::from_result("https://example.com", &r);

        assert_eq!(view.title(), "Safe URL");
        assert_eq!(view.confidence_text, "97.00%");
        assert_eq!(view.features.len(), 1);
        assert_eq!(view.features[0].line(), "a: 1");
        assert_eq!(view.shap_bars.len(), 1);
        assert_eq!(view.shap_bars[0].label, "a");
        assert_eq!(view.shap_bars[0].direction, ShapDirection::Positive);
        assert!((view.shap_bars[0].width_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_exactly_one_status_class() {
        for (status, class) in [
            ("safe", "status-safe"),
            ("suspicious", "status-suspicious"),
            ("dangerous", "status-dangerous"),
            ("weird", "status-unknown"),
        ] {
            let r = result(&format!(r#"{{"status": "{}"}}"#, status));
            let panel = VerdictView::from_result("https://x.test", &r).panel_class();
            let present: Vec<_> = StatusStyle::ALL_CLASSES
                .iter()
                .filter(|c| panel.split_whitespace().any(|p| p == **c))
                .collect();
            assert_eq!(present, vec![&class]);
        }
    }

    #[test]
    fn test_confidence_rounding() {
        assert_eq!(format_confidence(0.0), "0.00%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.65), "65.00%");
        assert_eq!(format_confidence(0.123456), "12.35%");
        assert_eq!(format_confidence(0.99), "99.00%");
    }

    #[test]
    fn test_shap_width_is_capped() {
        assert_eq!(shap_width_pct(0.45), 45.0);
        assert_eq!(shap_width_pct(-0.45), 45.0);
        assert_eq!(shap_width_pct(2.5), 100.0);
        assert_eq!(shap_width_pct(-7.0), 100.0);
        assert_eq!(shap_width_pct(f64::NAN), 0.0);
    }

    #[test]
    fn test_negative_shap_bar() {
        let bar = ShapBar::new("dns_resolve", -0.28);
        assert_eq!(bar.label, "dns resolve");
        assert_eq!(bar.direction, ShapDirection::Negative);
        assert_eq!(bar.direction.css_class(), "shap-negative");
        assert_eq!(bar.value_text(), "-0.28");
    }

    #[test]
    fn test_feature_rows_keep_order_and_humanize() {
        let r = result(
            r#"{"status": "suspicious", "features": {
                "domain_age": "3 days", "https": false, "redirects": 2, "whois": null}}"#,
        );
        let view = VerdictView::from_result("http://x.test", &r);
        let lines: Vec<_> = view.features.iter().map(FeatureRow::line).collect();
        assert_eq!(
            lines,
            vec!["domain age: 3 days", "https: false", "redirects: 2", "whois: N/A"]
        );
    }
}
