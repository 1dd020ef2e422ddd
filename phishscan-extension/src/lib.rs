//! PhishScan Browser Extension
//!
//! Two entry points share one WASM module:
//!
//! - [`start_popup`] mounts the popup: scan the active tab's URL and list the
//!   most recent scans kept in extension storage.
//! - [`start_background`] registers the "Scan with PhishScan" context-menu
//!   entry; [`handle_context_click`] opens the web scanner with the link
//!   prefilled.

use leptos::*;
use wasm_bindgen::prelude::*;

mod background;
mod chrome;
mod popup;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in the browser console
    console_error_panic_hook::set_once();
    phishscan::init_console_logging();
}

/// Mount the popup into `popup.html`
#[wasm_bindgen]
pub fn start_popup() {
    mount_to_body(|| view! { <popup::Popup /> });
}

/// Register the context-menu entry from the background service worker
#[wasm_bindgen]
pub fn start_background() {
    background::register();
}

/// Open the web scanner for a click on the context-menu entry
#[wasm_bindgen]
pub fn handle_context_click(info: JsValue) {
    background::handle_click(&info);
}
