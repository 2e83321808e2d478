//! Configuration types for noaa-feed.

use std::time::Duration;

/// Default feed host.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for fetching the alert feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the API (e.g., "https://api.weather.gov").
    pub base_url: String,
    /// User-Agent header. The NWS API rejects requests without one.
    pub user_agent: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl FeedConfig {
    /// Create a configuration for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the alerts endpoint URL.
    pub fn alerts_url(&self) -> String {
        format!("{}/alerts", self.base_url.trim_end_matches('/'))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// User agent identifying this crate and version.
pub fn default_user_agent() -> String {
    format!("weather-alerts/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_config_default() {
        let config = FeedConfig::default();
        assert_eq!(config.base_url, "https://api.weather.gov");
        assert_eq!(config.alerts_url(), "https://api.weather.gov/alerts");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("weather-alerts/"));
    }

    #[test]
    fn test_alerts_url_trims_trailing_slash() {
        let config = FeedConfig::new("http://127.0.0.1:9000/");
        assert_eq!(config.alerts_url(), "http://127.0.0.1:9000/alerts");
    }

    #[test]
    fn test_builders() {
        let config = FeedConfig::default()
            .with_user_agent("ops@example.com")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.user_agent, "ops@example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
