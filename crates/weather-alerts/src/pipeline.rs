//! Ingestion and reporting services.

use chrono::{DateTime, Utc};
use database::{weather_alert, AlertReport, Database, NewWeatherAlert, Severity, Urgency};
use noaa_feed::{decode_feature, AlertSource, FeedAlert};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};

/// What to do with a feature that cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log and continue with the rest of the batch.
    #[default]
    Skip,
    /// Stop the run. Rows written before the bad feature stay written.
    Abort,
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Features returned by the feed.
    pub fetched: usize,
    /// Alerts inserted or replaced.
    pub written: usize,
    /// Malformed features skipped.
    pub skipped: usize,
}

/// Fetch the feed once and upsert every decodable alert.
///
/// Each alert is written by its own statement; there is no batch
/// transaction.
pub async fn ingest(
    source: &dyn AlertSource,
    db: &Database,
    policy: MalformedPolicy,
) -> Result<IngestSummary> {
    let features = source.fetch_features().await?;
    let mut summary = IngestSummary {
        fetched: features.len(),
        ..IngestSummary::default()
    };

    for (index, feature) in features.iter().enumerate() {
        let alert = match decode_feature(feature) {
            Ok(alert) => alert,
            Err(source) => match policy {
                MalformedPolicy::Skip => {
                    warn!(index, error = %source, "Skipping malformed alert");
                    summary.skipped += 1;
                    continue;
                }
                MalformedPolicy::Abort => {
                    return Err(PipelineError::Malformed { index, source });
                }
            },
        };

        if !alert.missing.is_empty() || !alert.invalid.is_empty() {
            debug!(
                id = %alert.id,
                missing = ?alert.missing,
                invalid = ?alert.invalid,
                "Alert has absent fields"
            );
        }

        weather_alert::upsert_alert(db.pool(), &to_new_alert(alert)).await?;
        summary.written += 1;
    }

    info!(
        fetched = summary.fetched,
        written = summary.written,
        skipped = summary.skipped,
        "Ingestion complete"
    );

    Ok(summary)
}

/// Run every report section against `now`.
pub async fn report(db: &Database, now: DateTime<Utc>, limit: Option<u32>) -> Result<AlertReport> {
    let report = database::report::run_all(db.pool(), now, limit).await?;
    info!(
        total_alerts = report.summary.total_alerts,
        "Reports generated"
    );
    Ok(report)
}

/// Map a decoded feed alert onto the stored row shape.
///
/// Severity and urgency are normalized to their known values.
pub fn to_new_alert(alert: FeedAlert) -> NewWeatherAlert {
    NewWeatherAlert {
        id: alert.id,
        area_desc: alert.area_desc,
        event: alert.event,
        severity: alert
            .severity
            .map(|s| Severity::parse(&s).as_str().to_string()),
        certainty: alert.certainty,
        urgency: alert
            .urgency
            .map(|u| Urgency::parse(&u).as_str().to_string()),
        headline: alert.headline,
        description: alert.description,
        instruction: alert.instruction,
        sent: alert.sent,
        effective: alert.effective,
        expires: alert.expires,
        status: alert.status,
        message_type: alert.message_type,
        sender_name: alert.sender_name,
        web: alert.web,
        geometry_type: alert.geometry_type,
    }
}
