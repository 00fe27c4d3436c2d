//! Scan API client
//!
//! Thin client for the scanner backend:
//! - `GET /api/strategies` - available strategies
//! - `GET /api/scan/{strategy}` - run a scan, returns a payload
//! - `GET /api/health` - liveness check
//!
//! Every response is wrapped in `{ success, data, error }`. No retries.

use crate::dashboard::Payload;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Scans walk every data file on the server and can take a while
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors from the scan API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with `success: false`
    #[error("{0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Response envelope shared by all endpoints
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl Envelope {
    /// Unwrap `data`, turning `success: false` into [`ApiError::Rejected`]
    fn into_data(self, fallback_error: &str) -> Result<Value, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| fallback_error.to_string()),
            ));
        }
        Ok(self.data.unwrap_or(Value::Null))
    }
}

/// A strategy offered by the scanner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Client for the scan API
#[derive(Debug, Clone)]
pub struct ScanApi {
    base_url: String,
    client: reqwest::Client,
}

impl ScanApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Envelope, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        // Error responses (404/500) still carry an envelope, so the status
        // code is not checked here
        let envelope: Envelope = self.client.get(&url).send().await?.json().await?;
        Ok(envelope)
    }

    /// List available strategies
    pub async fn strategies(&self) -> Result<Vec<Strategy>, ApiError> {
        let data = self.get("/api/strategies").await?.into_data("获取策略列表失败")?;
        parse_strategies(data)
    }

    /// Run a scan and return its payload
    pub async fn scan(&self, strategy: &str) -> Result<Payload, ApiError> {
        let data = self
            .get(&format!("/api/scan/{}", strategy))
            .await?
            .into_data("扫描失败")?;
        let payload = Payload::from_value(&data);
        tracing::info!(
            "Scan {} returned {} results ({} scanned)",
            strategy,
            payload.results.len(),
            payload.total_scanned
        );
        Ok(payload)
    }

    /// True when the server reports `status: "ok"`; false on any failure
    pub async fn health(&self) -> bool {
        match self.get("/api/health").await {
            Ok(envelope) => is_healthy(&envelope),
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }
}

fn parse_strategies(data: Value) -> Result<Vec<Strategy>, ApiError> {
    serde_json::from_value(data).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn is_healthy(envelope: &Envelope) -> bool {
    envelope.success && envelope.status.as_deref() == Some("ok")
}
