//! `gloo-net` implementation of the scan backend client
//!
//! Used by the web app and the browser extension.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use std::cell::RefCell;

use super::{http_error, Endpoints, ScanApi};
use crate::error::{ApiResult, ScanError};
use crate::model::{ClearHistoryResponse, ScanRequest, ScanResult, Stats, ThemeUpdate};
use crate::prefs::Theme;

/// Scan backend reached through the browser's `fetch`
#[derive(Debug)]
pub struct WebScanApi {
    endpoints: RefCell<Endpoints>,
}

impl WebScanApi {
    /// `base` is an origin, or empty for same-origin requests
    pub fn new(base: &str) -> Self {
        Self {
            endpoints: RefCell::new(Endpoints::new(base)),
        }
    }

    /// Point subsequent requests at another origin
    pub fn set_base(&self, base: &str) {
        *self.endpoints.borrow_mut() = Endpoints::new(base);
    }

    pub fn endpoints(&self) -> Endpoints {
        self.endpoints.borrow().clone()
    }
}

fn map_gloo_error(e: gloo_net::Error) -> ScanError {
    match e {
        gloo_net::Error::SerdeError(e) => ScanError::Decode(e.to_string()),
        other => ScanError::Network(other.to_string()),
    }
}

async fn check_status(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(http_error(status, &text))
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let response = check_status(response).await?;
    let text = response.text().await.map_err(map_gloo_error)?;
    Ok(serde_json::from_str(&text)?)
}

#[async_trait(?Send)]
impl ScanApi for WebScanApi {
    async fn scan(&self, request: &ScanRequest) -> ApiResult<ScanResult> {
        let url = self.endpoints().scan();
        tracing::debug!(url = %url, target = %request.url, "Submitting scan");

        let response = Request::post(&url)
            .json(request)
            .map_err(map_gloo_error)?
            .send()
            .await
            .map_err(map_gloo_error)?;

        decode(response).await
    }

    async fn stats(&self) -> ApiResult<Stats> {
        let response = Request::get(&self.endpoints().stats())
            .send()
            .await
            .map_err(map_gloo_error)?;

        decode(response).await
    }

    async fn set_theme(&self, theme: Theme) -> ApiResult<()> {
        let response = Request::post(&self.endpoints().theme())
            .json(&ThemeUpdate { theme })
            .map_err(map_gloo_error)?
            .send()
            .await
            .map_err(map_gloo_error)?;

        check_status(response).await.map(|_| ())
    }

    async fn clear_history(&self) -> ApiResult<ClearHistoryResponse> {
        let response = Request::post(&self.endpoints().clear_history())
            .send()
            .await
            .map_err(map_gloo_error)?;

        decode(response).await
    }
}
