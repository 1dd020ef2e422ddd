//! HTTP API Client
//!
//! Backend origin for the web app. Requests go through
//! `phishscan::WebScanApi`; this module keeps its origin in local storage.

/// Local storage key for the backend origin override
pub const API_BASE_KEY: &str = "api-base";

/// Same origin as the page
pub const DEFAULT_API_BASE: &str = "";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Set the API base URL in local storage; empty resets to same-origin
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let url = normalize_base(url);
        let _ = if url.is_empty() {
            storage.remove_item(API_BASE_KEY)
        } else {
            storage.set_item(API_BASE_KEY, &url)
        };
    }
}

/// Remove whitespace and the trailing slash
pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(" http://localhost:5000/ "), "http://localhost:5000");
        assert_eq!(normalize_base(""), "");
    }
}
