//! NOAA weather alert ingestion and reporting.
//!
//! Two services composed by the `weather-alerts` binary:
//!
//! - [`ingest`] fetches the alert feed once and upserts every alert into the
//!   `weather_alerts` table.
//! - [`report`] runs the aggregate queries against a reference instant and
//!   returns the results; [`render_report`] formats them for the terminal.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;

pub use config::{Args, OutputFormat};
pub use error::{PipelineError, Result};
pub use pipeline::{ingest, report, to_new_alert, IngestSummary, MalformedPolicy};
pub use render::render_report;
