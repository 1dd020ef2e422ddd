//! Extension Popup Controller
//!
//! The browser-extension variant of the scan flow: prefill from the active
//! tab, scan against an absolute backend origin, and keep a capped history
//! of completed scans in extension storage.

use chrono::Utc;
use std::cell::RefCell;

use crate::client::{ScanApi, DEFAULT_EXTENSION_API_BASE};
use crate::controller::ScanController;
use crate::error::ScanError;
use crate::history::{ScanHistory, ScanHistoryEntry};
use crate::validate::is_web_url;
use crate::verdict::VerdictView;

/// Extension storage key for the scan history array
pub const HISTORY_STORAGE_KEY: &str = "scanHistory";

/// Extension storage key for an optional backend origin override
pub const API_BASE_STORAGE_KEY: &str = "apiBase";

/// Context-menu entry registered by the background script
pub const CONTEXT_MENU_ID: &str = "phishscan-scan-link";
pub const CONTEXT_MENU_TITLE: &str = "Scan with PhishScan";

/// Entries listed under the popup's scan form
pub const RECENT_IN_POPUP: usize = 5;

/// The active tab's URL if it is worth prefilling
pub fn prefill_url(tab_url: Option<&str>) -> Option<String> {
    tab_url.filter(|url| is_web_url(url)).map(str::to_string)
}

/// Backend origin from extension storage, falling back to the default
pub fn resolve_api_base(stored: Option<&str>) -> String {
    match stored.map(str::trim) {
        Some(base) if is_web_url(base) => base.trim_end_matches('/').to_string(),
        Some(base) if !base.is_empty() => {
            tracing::warn!(base = %base, "Ignoring invalid backend origin override");
            DEFAULT_EXTENSION_API_BASE.to_string()
        }
        _ => DEFAULT_EXTENSION_API_BASE.to_string(),
    }
}

/// Verdict and error line shown under the popup's form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupView {
    pub verdict: Option<VerdictView>,
    pub error: Option<String>,
}

impl PopupView {
    /// Apply one scan outcome; a failure keeps the previous verdict
    pub fn apply(&mut self, outcome: &Result<VerdictView, ScanError>) {
        match outcome {
            Ok(view) => {
                self.verdict = Some(view.clone());
                self.error = None;
            }
            Err(e) => self.error = Some(e.user_message()),
        }
    }
}

/// Popup scan flow with its own history
pub struct PopupController<A> {
    scanner: ScanController<A>,
    history: RefCell<ScanHistory>,
}

impl<A: ScanApi> PopupController<A> {
    /// `stored` is the history array read from extension storage
    pub fn new(api: A, stored: Vec<ScanHistoryEntry>) -> Self {
        Self {
            scanner: ScanController::new(api),
            history: RefCell::new(ScanHistory::from_entries(stored)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.scanner.is_busy()
    }

    /// Scan and record the completed scan as the newest history entry
    ///
    /// The caller persists [`history_entries`](Self::history_entries) after
    /// a successful scan.
    pub async fn scan(&self, raw: &str) -> Result<VerdictView, ScanError> {
        let view = self.scanner.scan(raw).await?;
        self.history.borrow_mut().record(ScanHistoryEntry::new(
            view.url.clone(),
            view.verdict.clone(),
            Utc::now(),
        ));
        Ok(view)
    }

    /// Newest-first entries, ready to be written back to storage
    pub fn history_entries(&self) -> Vec<ScanHistoryEntry> {
        self.history.borrow().to_vec()
    }

    pub fn recent(&self, limit: usize) -> Vec<ScanHistoryEntry> {
        self.history.borrow().iter().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{safe_result, FakeApi};
    use crate::model::Verdict;

    #[test]
    fn test_prefill_only_web_urls() {
        assert_eq!(
            prefill_url(Some("https://example.com/login")),
            Some("https://example.com/login".to_string())
        );
        assert_eq!(prefill_url(Some("chrome://newtab/")), None);
        assert_eq!(prefill_url(Some("")), None);
        assert_eq!(prefill_url(None), None);
    }

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(resolve_api_base(None), "http://localhost:5000");
        assert_eq!(resolve_api_base(Some("  ")), "http://localhost:5000");
        assert_eq!(
            resolve_api_base(Some("https://scan.example.org/")),
            "https://scan.example.org"
        );
        assert_eq!(resolve_api_base(Some("ftp://nope")), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_history_cap_after_51_scans() {
        let responses = (0..51).map(|_| Ok(safe_result())).collect();
        let popup = PopupController::new(FakeApi::answering(responses), Vec::new());

        for i in 0..51 {
            popup.scan(&format!("https://site{}.test", i)).await.unwrap();
        }

        let entries = popup.history_entries();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].url, "https://site50.test");
        assert_eq!(entries[49].url, "https://site1.test");
        assert!(entries.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_failed_scan_is_not_recorded() {
        let popup = PopupController::new(FakeApi::answering(vec![]), Vec::new());

        assert!(popup.scan("https://example.com").await.is_err());
        assert!(popup.scan("not a url").await.unwrap_err().is_validation());
        assert!(popup.history_entries().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_keeps_popup_verdict() {
        let popup = PopupController::new(
            FakeApi::answering(vec![
                Ok(safe_result()),
                Err(ScanError::Http {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                }),
            ]),
            Vec::new(),
        );
        let mut view = PopupView::default();

        view.apply(&popup.scan("https://example.com").await);
        let first = view.verdict.clone().unwrap();
        assert_eq!(view.error, None);

        view.apply(&popup.scan("https://other.test").await);
        assert_eq!(view.verdict, Some(first));
        assert!(view.error.as_deref().unwrap().contains("500"));
        assert_eq!(popup.history_entries().len(), 1);

        view.apply(&popup.scan("not a url").await);
        assert!(view.verdict.is_some());
    }

    #[tokio::test]
    async fn test_existing_history_is_extended() {
        let stored = vec![ScanHistoryEntry::new(
            "https://old.test",
            Verdict::Dangerous,
            Utc::now() - chrono::Duration::days(1),
        )];
        let popup = PopupController::new(FakeApi::answering(vec![Ok(safe_result())]), stored);

        popup.scan("https://new.test").await.unwrap();
        let recent = popup.recent(RECENT_IN_POPUP);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].url, "https://new.test");
        assert_eq!(recent[0].status, Verdict::Safe);
        assert_eq!(recent[1].url, "https://old.test");
    }
}
