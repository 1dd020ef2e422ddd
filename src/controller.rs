//! Scan Flow Controller
//!
//! Validates the input, submits it to the backend, turns the answer into a
//! `VerdictView` and refreshes the aggregate stats afterwards.
//!
//! The controller is shared by reference on a single-threaded event loop.
//! Session state sits in a `RefCell` whose borrows never span an `.await`.

use std::cell::RefCell;

use crate::charts::VerdictCounts;
use crate::client::ScanApi;
use crate::error::{ApiResult, ScanError};
use crate::history::{ScanHistory, ScanHistoryEntry};
use crate::model::{ClearHistoryResponse, ScanRequest, Stats};
use crate::toast::ToastKind;
use crate::validate::validate_scan_input;
use crate::verdict::VerdictView;

/// Everything the scanner page shows besides the input box
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    /// A scan is outstanding; the submit action is disabled
    pub busy: bool,
    /// Last successful verdict
    pub verdict: Option<VerdictView>,
    /// Last stats fetched from the backend (possibly stale)
    pub stats: Option<Stats>,
    /// Verdicts seen in this session, for the charts
    pub counts: VerdictCounts,
    /// Scans completed in this session
    pub history: ScanHistory,
}

/// Clears `busy` even if the scan future is dropped mid-flight
struct BusyGuard<'a> {
    session: &'a RefCell<ScanSession>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(session: &'a RefCell<ScanSession>) -> Result<Self, ScanError> {
        let mut s = session.borrow_mut();
        if s.busy {
            return Err(ScanError::Busy);
        }
        s.busy = true;
        Ok(Self { session })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.session.borrow_mut().busy = false;
    }
}

/// Scan flow for one scanner form
pub struct ScanController<A> {
    api: A,
    session: RefCell<ScanSession>,
}

impl<A: ScanApi> ScanController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            session: RefCell::new(ScanSession::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_busy(&self) -> bool {
        self.session.borrow().busy
    }

    /// Snapshot of the session for rendering
    pub fn session(&self) -> ScanSession {
        self.session.borrow().clone()
    }

    pub fn verdict(&self) -> Option<VerdictView> {
        self.session.borrow().verdict.clone()
    }

    pub fn stats(&self) -> Option<Stats> {
        self.session.borrow().stats
    }

    pub fn counts(&self) -> VerdictCounts {
        self.session.borrow().counts
    }

    /// Run one scan for the raw form input, then refresh stats
    ///
    /// Stats are refreshed after a failure as well.
    pub async fn submit(&self, raw: &str) -> Result<VerdictView, ScanError> {
        let result = self.scan(raw).await;
        if !matches!(result, Err(ScanError::Validation(_)) | Err(ScanError::Busy)) {
            self.refresh_stats().await;
        }
        result
    }

    /// Run one scan without touching stats
    ///
    /// Invalid input is rejected before any request is built. On failure the
    /// previous verdict stays in place.
    pub async fn scan(&self, raw: &str) -> Result<VerdictView, ScanError> {
        validate_scan_input(raw)?;
        let target = raw.trim().to_string();

        let guard = BusyGuard::acquire(&self.session)?;
        let outcome = self.api.scan(&ScanRequest::new(target.clone())).await;

        let result = match outcome {
            Ok(result) => {
                let view = VerdictView::from_result(&target, &result);
                tracing::info!(
                    url = %target,
                    verdict = %result.status,
                    confidence = %view.confidence_text,
                    "Scan complete"
                );

                let mut session = self.session.borrow_mut();
                session.counts.record(&result.status);
                session
                    .history
                    .record(ScanHistoryEntry::from_result(&target, &result));
                session.verdict = Some(view.clone());
                Ok(view)
            }
            Err(e) => {
                tracing::warn!(url = %target, error = %e, "Scan failed");
                Err(e)
            }
        };
        drop(guard);

        result
    }

    /// Fetch `/api/stats`; on failure the previous stats are kept
    pub async fn refresh_stats(&self) -> Option<Stats> {
        match self.api.stats().await {
            Ok(stats) => {
                self.session.borrow_mut().stats = Some(stats);
                Some(stats)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stats refresh failed, keeping stale values");
                None
            }
        }
    }

    /// Clear the backend history, then the session's own records
    pub async fn clear_history(&self) -> ApiResult<ClearHistoryResponse> {
        let response = self.api.clear_history().await?;
        if response.is_success() {
            let mut session = self.session.borrow_mut();
            session.history.clear();
            session.counts = VerdictCounts::default();
        } else {
            tracing::warn!(status = %response.status, "Backend refused to clear history");
        }

        self.refresh_stats().await;
        Ok(response)
    }
}

/// Toast shown after a submit attempt
pub fn scan_toast(result: &Result<VerdictView, ScanError>) -> (ToastKind, String) {
    match result {
        Ok(view) => (ToastKind::Success, format!("Scan complete: {}", view.title())),
        Err(ScanError::Validation(e)) => (ToastKind::Warning, e.to_string()),
        Err(ScanError::Busy) => (ToastKind::Info, ScanError::Busy.user_message()),
        Err(e) => (ToastKind::Error, e.user_message()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::ScanResult;
    use crate::prefs::Theme;
    use crate::toast::ToastQueue;
    use async_trait::async_trait;
    use std::cell::Cell;
    use std::collections::VecDeque;

    /// In-process backend that counts requests
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub scans: RefCell<VecDeque<ApiResult<ScanResult>>>,
        pub scan_calls: Cell<usize>,
        pub stats_calls: Cell<usize>,
        pub stats: Cell<Option<Stats>>,
        pub themes: RefCell<Vec<Theme>>,
    }

    impl FakeApi {
        pub(crate) fn answering(responses: Vec<ApiResult<ScanResult>>) -> Self {
            Self {
                scans: RefCell::new(responses.into()),
                stats: Cell::new(Some(Stats {
                    total_scans: 1,
                    threats_blocked: 0,
                })),
                ..Default::default()
            }
        }

        pub(crate) fn total_calls(&self) -> usize {
            self.scan_calls.get() + self.stats_calls.get()
        }
    }

    #[async_trait(?Send)]
    impl ScanApi for FakeApi {
        async fn scan(&self, _request: &ScanRequest) -> ApiResult<ScanResult> {
            self.scan_calls.set(self.scan_calls.get() + 1);
            self.scans
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ScanError::Network("no scripted response".into())))
        }

        async fn stats(&self) -> ApiResult<Stats> {
            self.stats_calls.set(self.stats_calls.get() + 1);
            self.stats
                .get()
                .ok_or_else(|| ScanError::Network("stats down".into()))
        }

        async fn set_theme(&self, theme: Theme) -> ApiResult<()> {
            self.themes.borrow_mut().push(theme);
            Ok(())
        }

        async fn clear_history(&self) -> ApiResult<ClearHistoryResponse> {
            Ok(ClearHistoryResponse {
                status: "success".to_string(),
                message: Some("History cleared".to_string()),
            })
        }
    }

    pub(crate) fn safe_result() -> ScanResult {
        serde_json::from_str(
            r#"{"status": "safe", "message": "ok", "confidence": 0.97,
                "features": {"a": 1}, "shap_values": {"a": 0.3}}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_input_issues_no_request() {
        let controller = ScanController::new(FakeApi::answering(vec![Ok(safe_result())]));

        for input in ["not a url", "", "   ", "example.com"] {
            let err = controller.submit(input).await.unwrap_err();
            assert!(err.is_validation(), "{input:?} should fail validation");
        }

        assert_eq!(controller.api().total_calls(), 0);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_successful_scan_renders_and_refreshes_stats() {
        let controller = ScanController::new(FakeApi::answering(vec![Ok(safe_result())]));

        let view = controller.submit("  https://example.com ").await.unwrap();
        assert_eq!(view.url, "https://example.com");
        assert_eq!(view.title(), "Safe URL");
        assert_eq!(view.confidence_text, "97.00%");
        assert_eq!(view.features[0].line(), "a: 1");

        assert_eq!(controller.api().scan_calls.get(), 1);
        assert_eq!(controller.api().stats_calls.get(), 1);
        assert_eq!(controller.stats().unwrap().total_scans, 1);
        assert_eq!(controller.counts().safe, 1);
        assert_eq!(controller.session().history.len(), 1);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_server_error_keeps_previous_verdict() {
        let controller = ScanController::new(FakeApi::answering(vec![
            Ok(safe_result()),
            Err(ScanError::Http {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        ]));

        let first = controller.submit("https://example.com").await.unwrap();
        let result = controller.submit("https://other.test").await;

        let mut toasts = ToastQueue::new();
        let (kind, message) = scan_toast(&result);
        toasts.push(kind, message);
        assert_eq!(toasts.active()[0].kind, ToastKind::Error);

        assert_eq!(controller.verdict(), Some(first));
        assert_eq!(controller.counts().total(), 1);
        // Stats are refreshed after a failure too
        assert_eq!(controller.api().stats_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_stats_failure_leaves_stats_stale() {
        let controller = ScanController::new(FakeApi::answering(vec![
            Ok(safe_result()),
            Ok(safe_result()),
        ]));

        controller.submit("https://example.com").await.unwrap();
        let before = controller.stats();

        controller.api().stats.set(None);
        controller.submit("https://example.com").await.unwrap();
        assert_eq!(controller.stats(), before);
    }

    #[tokio::test]
    async fn test_busy_rejects_second_submit() {
        let controller = ScanController::new(FakeApi::answering(vec![Ok(safe_result())]));
        controller.session.borrow_mut().busy = true;

        let err = controller.submit("https://example.com").await.unwrap_err();
        assert_eq!(err, ScanError::Busy);
        assert_eq!(controller.api().scan_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_unknown_status_is_rendered_not_fatal() {
        let odd: ScanResult =
            serde_json::from_str(r#"{"status": "quarantined", "confidence": 0.5}"#).unwrap();
        let controller = ScanController::new(FakeApi::answering(vec![Ok(odd)]));

        let view = controller.submit("https://example.com").await.unwrap();
        assert_eq!(view.panel_class(), "verdict-panel status-unknown");
        assert_eq!(controller.counts().total(), 0);
    }

    #[tokio::test]
    async fn test_clear_history_resets_session() {
        let controller = ScanController::new(FakeApi::answering(vec![Ok(safe_result())]));
        controller.submit("https://example.com").await.unwrap();

        let response = controller.clear_history().await.unwrap();
        assert!(response.is_success());
        assert!(controller.session().history.is_empty());
        assert_eq!(controller.counts(), VerdictCounts::default());
    }

    #[test]
    fn test_scan_toast_kinds() {
        let (kind, _) = scan_toast(&Err(ScanError::Validation(
            crate::error::ValidationError::Empty,
        )));
        assert_eq!(kind, ToastKind::Warning);

        let (kind, message) = scan_toast(&Err(ScanError::Network("refused".into())));
        assert_eq!(kind, ToastKind::Error);
        assert!(!message.is_empty());
    }
}
