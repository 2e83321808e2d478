//! Command-line and environment configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use noaa_feed::FeedConfig;

use crate::pipeline::MalformedPolicy;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Titled tables
    Table,
    /// The whole report as one JSON document
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "weather-alerts", version)]
#[command(about = "Fetch NOAA weather alerts into SQLite and print aggregate reports")]
pub struct Args {
    /// SQLite database URL
    #[arg(
        long,
        env = "WEATHER_ALERTS_DB",
        default_value = "sqlite:weather_alerts.db?mode=rwc"
    )]
    pub database_url: String,

    /// Base URL of the NWS API
    #[arg(long, env = "NOAA_API_URL", default_value = noaa_feed::DEFAULT_BASE_URL)]
    pub feed_url: String,

    /// User-Agent sent to the NWS API (defaults to weather-alerts/<version>)
    #[arg(long, env = "NOAA_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Feed request timeout in seconds
    #[arg(long, env = "NOAA_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum rows in ranked report sections (0 = unlimited)
    #[arg(long, env = "WEATHER_ALERTS_LIMIT", default_value_t = 10)]
    pub limit: u32,

    /// Report output format
    #[arg(long, env = "WEATHER_ALERTS_FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Abort the run on the first malformed alert instead of skipping it
    #[arg(long, env = "WEATHER_ALERTS_STRICT")]
    pub strict: bool,

    /// Only report over the existing store; do not fetch the feed
    #[arg(long)]
    pub skip_ingest: bool,
}

impl Args {
    /// Feed client configuration.
    pub fn feed_config(&self) -> FeedConfig {
        let config = FeedConfig::new(self.feed_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.clone()),
            None => config,
        }
    }

    /// Row cap for ranked sections.
    pub fn report_limit(&self) -> Option<u32> {
        (self.limit > 0).then_some(self.limit)
    }

    pub fn malformed_policy(&self) -> MalformedPolicy {
        if self.strict {
            MalformedPolicy::Abort
        } else {
            MalformedPolicy::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "weather-alerts",
            "--database-url",
            "sqlite::memory:",
            "--feed-url",
            "http://127.0.0.1:9000",
            "--user-agent",
            "ops@example.com",
            "--timeout-secs",
            "5",
            "--limit",
            "0",
            "--format",
            "json",
            "--strict",
            "--skip-ingest",
        ])
        .unwrap();

        assert_eq!(args.database_url, "sqlite::memory:");
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.report_limit(), None);
        assert_eq!(args.malformed_policy(), MalformedPolicy::Abort);
        assert!(args.skip_ingest);

        let feed = args.feed_config();
        assert_eq!(feed.alerts_url(), "http://127.0.0.1:9000/alerts");
        assert_eq!(feed.user_agent, "ops@example.com");
        assert_eq!(feed.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_limit_and_policy_helpers() {
        let args = Args::try_parse_from(["weather-alerts", "--limit", "3"]).unwrap();
        assert_eq!(args.report_limit(), Some(3));
        assert_eq!(args.malformed_policy(), MalformedPolicy::Skip);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from(["weather-alerts", "--format", "csv"]).is_err());
    }
}
