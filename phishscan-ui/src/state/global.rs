//! Global Application State
//!
//! Reactive state management using Leptos signals. The scan controller and
//! the theme controller from the `phishscan` crate own the logic; the
//! signals here mirror their state for rendering.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use phishscan::controller::{ScanController, ScanSession};
use phishscan::model::Stats;
use phishscan::prefs::{PreferenceStore, Theme};
use phishscan::theme::{ThemeChange, ThemeController, ToggleId};
use phishscan::toast::{ToastKind, ToastQueue};
use phishscan::{ScanApi, WebScanApi};

use crate::api;
use crate::state::storage::BrowserStorage;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Current color theme
    pub theme: RwSignal<Theme>,
    /// Decorative particles are shown (dark mode)
    pub particles_visible: RwSignal<bool>,
    /// Animations preference, read by effects when they start
    pub animations_enabled: RwSignal<bool>,
    /// Active toasts
    pub toasts: RwSignal<ToastQueue>,
    /// Latest `/api/stats`, possibly stale
    pub stats: RwSignal<Option<Stats>>,
    /// Snapshot of the scan session (verdict, counts, history)
    pub session: RwSignal<ScanSession>,
    /// A scan is outstanding
    pub scanning: RwSignal<bool>,
    /// Shared scan flow
    pub scanner: Rc<ScanController<WebScanApi>>,
    themes: Rc<RefCell<ThemeController<BrowserStorage>>>,
    /// Theme toggle in the navigation bar
    pub nav_toggle: ToggleId,
    /// Theme toggle on the settings page
    pub settings_toggle: ToggleId,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let prefs = PreferenceStore::new(BrowserStorage);
    let animations_enabled = prefs.animations_enabled();

    let mut themes = ThemeController::new(prefs);
    let nav_toggle = themes.register("nav");
    let settings_toggle = themes.register("settings");
    let initial = themes.initial();
    set_document_theme(initial.theme);

    let state = GlobalState {
        theme: create_rw_signal(initial.theme),
        particles_visible: create_rw_signal(initial.particles_visible),
        animations_enabled: create_rw_signal(animations_enabled),
        toasts: create_rw_signal(ToastQueue::new()),
        stats: create_rw_signal(None),
        session: create_rw_signal(ScanSession::default()),
        scanning: create_rw_signal(false),
        scanner: Rc::new(ScanController::new(WebScanApi::new(&api::get_api_base()))),
        themes: Rc::new(RefCell::new(themes)),
        nav_toggle,
        settings_toggle,
    };

    provide_context(state);
}

/// Set the `data-theme` attribute the stylesheet keys on
fn set_document_theme(theme: Theme) {
    if let Some(root) = document().document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

impl GlobalState {
    /// Handle a change event from one of the theme toggles
    pub fn toggle_theme(&self, source: ToggleId, dark_checked: bool) {
        let change = self.themes.borrow_mut().on_toggle(source, dark_checked);
        if let Some(change) = change {
            self.apply_theme_change(change);
        }
    }

    /// Whether a toggle shows the dark state
    pub fn is_dark_checked(&self, toggle: ToggleId) -> bool {
        // Subscribe so toggles re-render when the theme changes elsewhere
        let _ = self.theme.get();
        self.themes.borrow().is_dark_checked(toggle)
    }

    fn apply_theme_change(&self, change: ThemeChange) {
        set_document_theme(change.theme);
        self.theme.set(change.theme);
        self.particles_visible.set(change.particles_visible);

        // Best-effort: the backend only records the preference
        let scanner = Rc::clone(&self.scanner);
        spawn_local(async move {
            if let Err(e) = scanner.api().set_theme(change.theme).await {
                tracing::warn!(error = %e, "Theme notification failed");
            }
        });
    }

    /// Persist the animations preference; running effects restart
    pub fn set_animations_enabled(&self, enabled: bool) {
        self.themes.borrow().prefs().set_animations_enabled(enabled);
        self.animations_enabled.set(enabled);
    }

    /// Persist a new backend origin and use it from the next request on
    pub fn set_api_base(&self, base: &str) {
        api::set_api_base(base);
        self.scanner.api().set_base(&api::get_api_base());
    }

    /// Copy the controller's session into the session signal
    pub fn sync_session(&self) {
        self.session.set(self.scanner.session());
        if let Some(stats) = self.scanner.stats() {
            self.stats.set(Some(stats));
        }
    }

    /// Fetch `/api/stats`; failures keep the previous values
    pub async fn refresh_stats(&self) {
        // Failures are logged by the controller
        self.scanner.refresh_stats().await;
        self.sync_session();
    }

    /// Enqueue a toast and schedule its dismissal
    pub fn notify(&self, kind: ToastKind, message: &str) {
        let mut id = 0;
        self.toasts.update(|queue| id = queue.push(kind, message));

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(kind.duration_ms(), move || {
            toasts.update(|queue| queue.dismiss(id));
        })
        .forget();
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }
}
