//! # PhishScan
//!
//! Client layer for a URL-reputation scanner. The classification itself runs
//! on a backend reached over a small JSON API; this crate holds everything in
//! front of it.
//!
//! ## Features
//!
//! - **Scan flow**: validation, submit, verdict rendering, stats refresh
//! - **Charts**: verdict counts and per-day activity from typed results
//! - **Effects**: particle field and loading sequence state machines
//! - **Preferences**: theme and animation flags over any key-value store
//! - **History**: capped newest-first scan log with plain-text reports
//!
//! ## Modules
//!
//! - [`controller`]: Scan flow for the web scanner page and the terminal
//! - [`popup`]: Scan flow for the browser-extension popup
//! - [`client`]: The `ScanApi` seam and backend endpoints
//! - [`verdict`]: What the verdict panel shows for one result
//!
//! The `native` feature (on by default) adds the `reqwest` client, the
//! configuration loader and the `phishscan` binary. The browser crates build
//! this library with `default-features = false` and the `web` feature, which
//! adds the `gloo-net` client and console logging for `tracing` events.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phishscan::{HttpScanApi, ScanController};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpScanApi::new("http://localhost:5000", Duration::from_secs(30))?;
//!     let controller = ScanController::new(api);
//!
//!     let view = controller.submit("https://example.com").await?;
//!     println!("{} ({})", view.title(), view.confidence_text);
//!
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod client;
pub mod controller;
pub mod effects;
pub mod error;
pub mod history;
pub mod model;
pub mod popup;
pub mod prefs;
pub mod theme;
pub mod toast;
pub mod validate;
pub mod verdict;

#[cfg(feature = "native")]
pub mod config;

#[cfg(feature = "web")]
pub mod web_log;

// Re-export top-level types for convenience
pub use error::{ApiResult, ScanError, ValidationError};

pub use model::{ScanRequest, ScanResult, Stats, Verdict};

pub use client::{Endpoints, ScanApi};

#[cfg(feature = "native")]
pub use client::HttpScanApi;

#[cfg(feature = "web")]
pub use client::WebScanApi;

#[cfg(feature = "web")]
pub use web_log::init_console_logging;

pub use controller::{scan_toast, ScanController, ScanSession};

pub use popup::{PopupController, PopupView};

pub use verdict::{StatusStyle, VerdictView};

pub use history::{ScanHistory, ScanHistoryEntry, HISTORY_CAPACITY};

pub use prefs::{KeyValueStore, MemoryStore, PreferenceStore, Preferences, Theme};

pub use theme::{ThemeChange, ThemeController};

pub use toast::{Toast, ToastKind, ToastQueue};

pub use charts::{DailySeries, VerdictCounts};

pub use effects::{EffectPhase, LoadingSequence, ParticleField};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
