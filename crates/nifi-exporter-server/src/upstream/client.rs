use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use nifi_exporter_core::error::{ExporterError, Result};
use nifi_exporter_core::status::Endpoint;

use crate::config::UpstreamSection;

/// Source of status documents, one per endpoint. Mocked in tests.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value>;
}

/// Bounded-timeout JSON GET. No retries: the next scheduled cycle is the retry.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    bearer_token: Option<String>,
}

impl UpstreamClient {
    pub fn new(bearer_token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ExporterError::Internal(format!("http client init failed: {e}")))?;
        Ok(Self { http, bearer_token })
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Fails with `Connection`, `Timeout` (the whole exchange, body included,
    /// exceeded `timeout`), `HttpStatus` (non-2xx) or `Decode` (not JSON).
    pub async fn fetch_json(&self, url: &str, timeout: Duration) -> Result<Value> {
        let mut req = self.http.get(url).timeout(timeout).header(ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| classify(url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ExporterError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| classify(url, e))?;
        serde_json::from_slice(&body).map_err(|e| ExporterError::Decode(format!("{url}: {e}")))
    }
}

fn classify(url: &str, e: reqwest::Error) -> ExporterError {
    if e.is_timeout() {
        ExporterError::Timeout { url: url.to_string() }
    } else {
        ExporterError::Connection {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

/// The NiFi REST API under one base URL.
pub struct NifiApi {
    client: UpstreamClient,
    base_url: String,
    timeout: Duration,
}

impl NifiApi {
    pub fn new(cfg: &UpstreamSection) -> Result<Self> {
        Ok(Self::with_client(
            UpstreamClient::new(cfg.bearer_token.clone())?,
            &cfg.base_url,
            cfg.timeout(),
        ))
    }

    pub fn with_client(client: UpstreamClient, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StatusSource for NifiApi {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value> {
        self.client.fetch_json(&endpoint.url(&self.base_url), self.timeout).await
    }
}
