//! NOAA/NWS alert feed HTTP client.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::error::FeedError;

/// A source of raw alert features.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch the current set of alert features in one call.
    async fn fetch_features(&self) -> Result<Vec<Value>, FeedError>;
}

/// Client for the `/alerts` endpoint.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Build a client from configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        if config.user_agent.trim().is_empty() {
            return Err(FeedError::Config("user agent must not be empty".to_string()));
        }

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(FeedError::Http)?;

        Ok(Self { http, config })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetch the alert collection and return its features.
    pub async fn fetch_collection(&self) -> Result<Vec<Value>, FeedError> {
        let url = self.config.alerts_url();
        info!("Fetching weather alerts from {}", url);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/geo+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        debug!("Received {} bytes from feed", body.len());

        let features = parse_collection(serde_json::from_str(&body)?)?;
        info!("Feed returned {} alerts", features.len());
        Ok(features)
    }
}

#[async_trait]
impl AlertSource for FeedClient {
    async fn fetch_features(&self) -> Result<Vec<Value>, FeedError> {
        self.fetch_collection().await
    }
}

/// Extract the `features` array from a feature collection.
///
/// A collection without `features` is treated as empty.
pub fn parse_collection(body: Value) -> Result<Vec<Value>, FeedError> {
    let Value::Object(mut collection) = body else {
        return Err(FeedError::InvalidPayload(
            "expected a JSON object".to_string(),
        ));
    };

    match collection.remove("features") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(features)) => Ok(features),
        Some(other) => Err(FeedError::InvalidPayload(format!(
            "features is not an array (found {})",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
