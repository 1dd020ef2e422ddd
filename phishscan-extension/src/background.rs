//! Background service worker
//!
//! Registers the context-menu entry and opens the web scanner for whatever
//! the user right-clicked. The click listener itself is attached
//! synchronously by `background.js` and forwards into [`handle_click`].

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use phishscan::client::Endpoints;
use phishscan::popup::{resolve_api_base, CONTEXT_MENU_ID, CONTEXT_MENU_TITLE};

use crate::chrome;

/// Contexts the entry is offered in
const MENU_CONTEXTS: [&str; 2] = ["link", "page"];

pub fn register() {
    spawn_local(async {
        if let Err(e) =
            chrome::install_context_menu(CONTEXT_MENU_ID, CONTEXT_MENU_TITLE, &MENU_CONTEXTS).await
        {
            tracing::warn!(error = %e, "Context menu registration failed");
        }
    });
}

/// `chrome.contextMenus.onClicked` with its `OnClickData`
pub fn handle_click(info: &JsValue) {
    if let Some(target) = click_target(info) {
        spawn_local(open_scanner(target));
    }
}

fn click_target(info: &JsValue) -> Option<String> {
    let menu_id = chrome::string_property(info, "menuItemId");
    context_menu_target(
        menu_id.as_deref(),
        chrome::string_property(info, "linkUrl"),
        chrome::string_property(info, "pageUrl"),
    )
}

/// The URL to scan for a click on our entry: the link, else the page
fn context_menu_target(
    menu_id: Option<&str>,
    link_url: Option<String>,
    page_url: Option<String>,
) -> Option<String> {
    if menu_id != Some(CONTEXT_MENU_ID) {
        return None;
    }
    link_url
        .filter(|url| !url.is_empty())
        .or(page_url)
        .filter(|url| !url.is_empty())
}

async fn open_scanner(target: String) {
    let stored = match chrome::load_api_base().await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!(error = %e, "Reading apiBase failed, using default");
            None
        }
    };
    let page = Endpoints::new(&resolve_api_base(stored.as_deref())).scanner_page(&target);

    if let Err(e) = chrome::open_tab(&page).await {
        tracing::warn!(url = %page, error = %e, "Opening the scanner failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_preferred_over_page() {
        let target = context_menu_target(
            Some(CONTEXT_MENU_ID),
            Some("https://link.test/a".to_string()),
            Some("https://page.test/".to_string()),
        );
        assert_eq!(target.as_deref(), Some("https://link.test/a"));

        let target =
            context_menu_target(Some(CONTEXT_MENU_ID), None, Some("https://page.test/".to_string()));
        assert_eq!(target.as_deref(), Some("https://page.test/"));
    }

    #[test]
    fn test_other_menu_ids_ignored() {
        let target = context_menu_target(
            Some("someone-else"),
            Some("https://link.test/a".to_string()),
            None,
        );
        assert_eq!(target, None);
        assert_eq!(context_menu_target(Some(CONTEXT_MENU_ID), None, None), None);
    }

    #[test]
    fn test_scanner_page_encodes_target() {
        let page = Endpoints::new(&resolve_api_base(None)).scanner_page("https://a.test/?q=1&r=2");
        assert_eq!(
            page,
            "http://localhost:5000/scanner?url=https%3A%2F%2Fa.test%2F%3Fq%3D1%26r%3D2"
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use js_sys::{Object, Reflect};
    use wasm_bindgen_test::wasm_bindgen_test;

    fn click_data(pairs: &[(&str, &str)]) -> JsValue {
        let info = Object::new();
        for (key, value) in pairs {
            Reflect::set(&info, &JsValue::from_str(key), &JsValue::from_str(value)).unwrap();
        }
        info.into()
    }

    #[wasm_bindgen_test]
    fn test_click_data_target() {
        let info = click_data(&[
            ("menuItemId", CONTEXT_MENU_ID),
            ("linkUrl", "https://link.test/a"),
            ("pageUrl", "https://page.test/"),
        ]);
        assert_eq!(click_target(&info).as_deref(), Some("https://link.test/a"));

        let info = click_data(&[("menuItemId", "other"), ("pageUrl", "https://page.test/")]);
        assert_eq!(click_target(&info), None);
    }
}
