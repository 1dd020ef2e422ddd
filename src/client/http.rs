//! `reqwest` implementation of the scan backend client

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{http_error, Endpoints, ScanApi};
use crate::error::{ApiResult, ScanError};
use crate::model::{ClearHistoryResponse, ScanRequest, ScanResult, Stats, ThemeUpdate};
use crate::prefs::Theme;

/// HTTP client for the scan backend
pub struct HttpScanApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpScanApi {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(base_url),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(http_error(status.as_u16(), &text));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ScanError {
    if e.is_timeout() {
        ScanError::Network("request timed out".to_string())
    } else if e.is_connect() {
        ScanError::Network(format!("could not connect: {}", e))
    } else if e.is_decode() {
        ScanError::Decode(e.to_string())
    } else {
        ScanError::Network(e.to_string())
    }
}

#[async_trait(?Send)]
impl ScanApi for HttpScanApi {
    async fn scan(&self, request: &ScanRequest) -> ApiResult<ScanResult> {
        let url = self.endpoints.scan();
        tracing::debug!(url = %url, target = %request.url, "Submitting scan");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::decode(response).await
    }

    async fn stats(&self) -> ApiResult<Stats> {
        let response = self
            .client
            .get(self.endpoints.stats())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::decode(response).await
    }

    async fn set_theme(&self, theme: Theme) -> ApiResult<()> {
        let response = self
            .client
            .post(self.endpoints.theme())
            .json(&ThemeUpdate { theme })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            Err(http_error(status, &text))
        }
    }

    async fn clear_history(&self) -> ApiResult<ClearHistoryResponse> {
        let response = self
            .client
            .post(self.endpoints.clear_history())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_endpoints() {
        let api = HttpScanApi::new("http://127.0.0.1:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.endpoints().scan(), "http://127.0.0.1:5000/api/scan");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) is closed on any sane test machine
        let api = HttpScanApi::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = api.stats().await.unwrap_err();
        assert!(matches!(err, ScanError::Network(_)));
    }
}
