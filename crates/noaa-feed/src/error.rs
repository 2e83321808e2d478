//! Error types for noaa-feed.

use thiserror::Error;

/// Errors that can occur when fetching the alert feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed answered with a non-success status.
    #[error("feed returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response was JSON but not a feature collection.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reasons a single feed feature cannot be turned into an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Feature is not a JSON object.
    #[error("feature is not an object")]
    NotAnObject,

    /// Feature has no `properties` object.
    #[error("feature has no properties object")]
    MissingProperties,

    /// Properties have no usable `id`.
    #[error("feature has no alert id")]
    MissingId,
}
