//! PhishScan Web App
//!
//! URL-reputation scanner frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Scan a URL and render the verdict with feature contributions
//! - Dashboard charts from live stats and session history
//! - Light and dark themes with a decorative particle background
//! - Downloadable plain-text scan reports
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The scan flow, verdict rendering and chart data live in the
//! `phishscan` crate; this crate wires them to the DOM and to the backend
//! over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    phishscan::init_console_logging();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
