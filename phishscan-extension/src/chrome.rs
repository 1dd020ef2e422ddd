//! Extension API bindings
//!
//! Raw `chrome.*` imports and typed wrappers over them. The promise-returning
//! calls are MV3 APIs; every wrapper maps JS failures into [`ChromeError`].

use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

use phishscan::history::ScanHistoryEntry;
use phishscan::popup::{API_BASE_STORAGE_KEY, HISTORY_STORAGE_KEY};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    async fn storage_local_get(keys: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    async fn storage_local_set(items: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    async fn tabs_query(query: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = create)]
    async fn tabs_create(properties: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "contextMenus"], js_name = removeAll)]
    async fn context_menus_remove_all() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "contextMenus"], js_name = create)]
    fn context_menus_create(properties: &JsValue);
}

/// Extension API errors
#[derive(Debug, Error)]
pub enum ChromeError {
    #[error("Extension API call failed: {0}")]
    Js(String),

    #[error("Stored value could not be decoded: {0}")]
    Decode(String),
}

impl From<JsValue> for ChromeError {
    fn from(value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        ChromeError::Js(message)
    }
}

impl From<serde_wasm_bindgen::Error> for ChromeError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        ChromeError::Decode(err.to_string())
    }
}

pub type ChromeResult<T> = Result<T, ChromeError>;

/// Plain JS objects and arrays, never `Map`
fn to_js<T: Serialize + ?Sized>(value: &T) -> ChromeResult<JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// String property of a JS object, if present
pub fn string_property(object: &JsValue, key: &str) -> Option<String> {
    Reflect::get(object, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_string())
}

async fn storage_value(key: &str) -> ChromeResult<JsValue> {
    let items = storage_local_get(&JsValue::from_str(key)).await?;
    Ok(Reflect::get(&items, &JsValue::from_str(key))?)
}

/// The `scanHistory` array; empty when nothing was stored yet
pub async fn load_history() -> ChromeResult<Vec<ScanHistoryEntry>> {
    let value = storage_value(HISTORY_STORAGE_KEY).await?;
    if value.is_undefined() || value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// Overwrite `scanHistory`
pub async fn save_history(entries: &[ScanHistoryEntry]) -> ChromeResult<()> {
    let items = Object::new();
    Reflect::set(&items, &JsValue::from_str(HISTORY_STORAGE_KEY), &to_js(entries)?)?;
    storage_local_set(&items).await?;
    Ok(())
}

/// Raw `apiBase` override
pub async fn load_api_base() -> ChromeResult<Option<String>> {
    Ok(storage_value(API_BASE_STORAGE_KEY).await?.as_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TabQuery {
    active: bool,
    current_window: bool,
}

/// URL of the focused tab, when the extension may read it
pub async fn active_tab_url() -> ChromeResult<Option<String>> {
    let query = to_js(&TabQuery {
        active: true,
        current_window: true,
    })?;
    let tabs: Array = tabs_query(&query).await?.unchecked_into();
    Ok(string_property(&tabs.get(0), "url"))
}

#[derive(Serialize)]
struct CreateTab<'a> {
    url: &'a str,
}

pub async fn open_tab(url: &str) -> ChromeResult<()> {
    tabs_create(&to_js(&CreateTab { url })?).await?;
    Ok(())
}

#[derive(Serialize)]
struct MenuItem<'a> {
    id: &'a str,
    title: &'a str,
    contexts: &'a [&'a str],
}

/// Replace every context-menu entry of the extension with one entry
pub async fn install_context_menu(id: &str, title: &str, contexts: &[&str]) -> ChromeResult<()> {
    context_menus_remove_all().await?;
    context_menus_create(&to_js(&MenuItem {
        id,
        title,
        contexts,
    })?);
    Ok(())
}
