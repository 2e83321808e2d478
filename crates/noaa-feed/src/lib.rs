//! Client for the NOAA/NWS active alerts feed.
//!
//! Fetches the GeoJSON alert collection from `api.weather.gov` and decodes
//! each feature into a [`FeedAlert`].
//!
//! # Example
//!
//! ```no_run
//! use noaa_feed::{decode_feature, AlertSource, FeedClient, FeedConfig};
//!
//! # async fn example() -> Result<(), noaa_feed::FeedError> {
//! let client = FeedClient::new(FeedConfig::default())?;
//! for feature in client.fetch_features().await? {
//!     if let Ok(alert) = decode_feature(&feature) {
//!         println!("{}: {:?}", alert.id, alert.event);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;

pub use client::{parse_collection, AlertSource, FeedClient};
pub use config::{default_user_agent, FeedConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use decode::{decode_feature, AlertField, FeedAlert};
pub use error::{DecodeError, FeedError};
