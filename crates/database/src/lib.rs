//! SQLite persistence layer for NOAA weather alerts.
//!
//! This crate stores alerts fetched from the feed in a flat `weather_alerts`
//! table and runs the aggregate reports over it, using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, NewWeatherAlert, weather_alert};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:weather_alerts.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let mut alert = NewWeatherAlert::new("urn:oid:2.49.0.1.840.0.example");
//!     alert.event = Some("Flood Warning".to_string());
//!     weather_alert::upsert_alert(db.pool(), &alert).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod report;
pub mod weather_alert;

pub use error::{DatabaseError, Result};
pub use models::{
    AreaCount, ColumnQuality, EventCount, ExpirationCount, ExpirationStatus, NewWeatherAlert,
    Severity, SeverityShare, SummaryStats, TexasSummary, Urgency, UrgentAlert, WeatherAlert,
};
pub use report::AlertReport;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// The pipeline is sequential, so a small pool is enough.
    const DEFAULT_POOL_SIZE: u32 = 4;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// The database file is created if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:weather_alerts.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing); keep a single connection so every
    /// // query sees the same database.
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
