//! Error types for the alert pipeline.

use noaa_feed::{DecodeError, FeedError};
use thiserror::Error;

/// Errors that stop a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetching the feed failed.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Reading or writing the store failed.
    #[error("{0}")]
    Database(#[from] database::DatabaseError),

    /// A feature could not be decoded and the run is strict.
    #[error("malformed alert at index {index}: {source}")]
    Malformed { index: usize, source: DecodeError },

    /// Writing the JSON report failed.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
