//! Aggregate reports over stored alerts.
//!
//! Every time-relative query takes the reference instant as a bound
//! parameter instead of using SQLite's `'now'`, so results are reproducible.
//! Timestamps go through `julianday()`, which folds the feed's UTC offsets
//! into a single timeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::models::{
    AreaCount, ColumnQuality, EventCount, ExpirationCount, ExpirationStatus, SeverityShare,
    SummaryStats, TexasSummary, UrgentAlert,
};
use crate::Result;

/// Columns of `weather_alerts`, in schema order.
pub const ALERT_COLUMNS: [&str; 18] = [
    "id",
    "area_desc",
    "event",
    "severity",
    "certainty",
    "urgency",
    "headline",
    "description",
    "instruction",
    "sent",
    "effective",
    "expires",
    "status",
    "message_type",
    "sender_name",
    "web",
    "geometry_type",
    "created_at",
];

/// Results of every report section, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertReport {
    /// Reference instant the time-relative sections were computed against.
    pub generated_at: DateTime<Utc>,
    pub event_counts: Vec<EventCount>,
    pub severity_distribution: Vec<SeverityShare>,
    pub texas: TexasSummary,
    pub expiration_status: Vec<ExpirationCount>,
    pub top_active_areas: Vec<AreaCount>,
    pub urgent_alerts: Vec<UrgentAlert>,
    pub summary: SummaryStats,
    pub data_quality: Vec<ColumnQuality>,
}

/// Run all report sections against the reference instant `now`.
///
/// `limit` caps the ranked sections (event counts, top areas, urgent alerts).
pub async fn run_all(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    limit: Option<u32>,
) -> Result<AlertReport> {
    tracing::debug!(now = %now, ?limit, "Running alert reports");

    Ok(AlertReport {
        generated_at: now,
        event_counts: event_counts(pool, limit).await?,
        severity_distribution: severity_distribution(pool).await?,
        texas: texas_summary(pool, now).await?,
        expiration_status: expiration_status(pool, now).await?,
        top_active_areas: top_active_areas(pool, now, limit).await?,
        urgent_alerts: urgent_alerts(pool, now, limit).await?,
        summary: summary_stats(pool).await?,
        data_quality: data_quality(pool).await?,
    })
}

/// Count alerts per event type, most frequent first.
pub async fn event_counts(pool: &SqlitePool, limit: Option<u32>) -> Result<Vec<EventCount>> {
    let rows = sqlx::query_as::<_, EventCount>(
        r#"
        SELECT event, COUNT(*) AS alert_count
        FROM weather_alerts
        WHERE event IS NOT NULL
        GROUP BY event
        ORDER BY alert_count DESC, event ASC
        LIMIT ?
        "#,
    )
    .bind(sql_limit(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count alerts per severity, including alerts with no severity, with each
/// group's share of the table.
pub async fn severity_distribution(pool: &SqlitePool) -> Result<Vec<SeverityShare>> {
    let rows = sqlx::query_as::<_, SeverityShare>(
        r#"
        SELECT
            severity,
            COUNT(*) AS alert_count,
            ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM weather_alerts), 2) AS percentage
        FROM weather_alerts
        GROUP BY severity
        ORDER BY alert_count DESC, severity ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Count alerts whose area mentions "TX" or "Texas" (case-sensitive), and
/// how many of those were sent after `now` minus 7 days.
///
/// The weekly window has no upper bound; a `sent` slightly ahead of `now`
/// still counts.
pub async fn texas_summary(pool: &SqlitePool, now: DateTime<Utc>) -> Result<TexasSummary> {
    let now = sql_instant(now);
    let summary = sqlx::query_as::<_, TexasSummary>(
        r#"
        SELECT
            COUNT(*) AS texas_alerts,
            COUNT(CASE
                WHEN julianday(sent) > julianday(?) - 7 THEN 1
            END) AS texas_alerts_this_week
        FROM weather_alerts
        WHERE instr(area_desc, 'TX') > 0 OR instr(area_desc, 'Texas') > 0
        "#,
    )
    .bind(&now)
    .fetch_one(pool)
    .await?;

    Ok(summary)
}

/// Classify every alert as active, expired, or without expiry and count
/// each bucket. An alert expiring exactly at `now` is expired.
pub async fn expiration_status(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<ExpirationCount>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT
            CASE
                WHEN expires IS NULL THEN 'No Expiration Set'
                WHEN julianday(expires) > julianday(?) THEN 'Active'
                ELSE 'Expired'
            END AS expiration_status,
            COUNT(*) AS count
        FROM weather_alerts
        GROUP BY expiration_status
        ORDER BY count DESC, expiration_status ASC
        "#,
    )
    .bind(sql_instant(now))
    .fetch_all(pool)
    .await?;

    let counts = rows
        .into_iter()
        .filter_map(|(label, count)| {
            ExpirationStatus::from_label(&label).map(|status| ExpirationCount { status, count })
        })
        .collect();

    Ok(counts)
}

/// Count active, actual alerts per area, busiest first.
pub async fn top_active_areas(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    limit: Option<u32>,
) -> Result<Vec<AreaCount>> {
    let rows = sqlx::query_as::<_, AreaCount>(
        r#"
        SELECT area_desc, COUNT(*) AS active_alerts
        FROM weather_alerts
        WHERE (expires IS NULL OR julianday(expires) > julianday(?))
            AND status = 'Actual'
            AND area_desc IS NOT NULL
        GROUP BY area_desc
        ORDER BY active_alerts DESC, area_desc ASC
        LIMIT ?
        "#,
    )
    .bind(sql_instant(now))
    .bind(sql_limit(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List immediate, severe-or-extreme alerts that have not expired,
/// soonest-expiring first. Alerts without an expiry sort last.
pub async fn urgent_alerts(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    limit: Option<u32>,
) -> Result<Vec<UrgentAlert>> {
    let now = sql_instant(now);
    let rows = sqlx::query_as::<_, UrgentAlert>(
        r#"
        SELECT
            id,
            event,
            area_desc,
            severity,
            urgency,
            expires,
            CASE
                WHEN expires IS NOT NULL
                THEN CAST(ROUND((julianday(expires) - julianday(?)) * 1440.0) AS INTEGER)
            END AS minutes_until_expiration
        FROM weather_alerts
        WHERE urgency = 'Immediate'
            AND severity IN ('Severe', 'Extreme')
            AND (expires IS NULL OR julianday(expires) > julianday(?))
        ORDER BY
            minutes_until_expiration IS NULL,
            minutes_until_expiration ASC,
            id ASC
        LIMIT ?
        "#,
    )
    .bind(&now)
    .bind(&now)
    .bind(sql_limit(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Headline counts over the whole table.
pub async fn summary_stats(pool: &SqlitePool) -> Result<SummaryStats> {
    let stats = sqlx::query_as::<_, SummaryStats>(
        r#"
        SELECT
            COUNT(*) AS total_alerts,
            COUNT(CASE WHEN status = 'Actual' THEN 1 END) AS actual_alerts,
            COUNT(CASE WHEN status = 'Test' THEN 1 END) AS test_alerts,
            COUNT(CASE WHEN urgency = 'Immediate' THEN 1 END) AS immediate_alerts,
            COUNT(CASE WHEN severity = 'Severe' THEN 1 END) AS severe_alerts,
            COUNT(CASE WHEN severity = 'Extreme' THEN 1 END) AS extreme_alerts
        FROM weather_alerts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}

/// Null counts for every column.
pub async fn data_quality(pool: &SqlitePool) -> Result<Vec<ColumnQuality>> {
    // Column names come from ALERT_COLUMNS, never from input.
    let counts = ALERT_COLUMNS
        .iter()
        .map(|column| format!("COUNT({column})"))
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!("SELECT COUNT(*), {counts} FROM weather_alerts");

    let row = sqlx::query(&query).fetch_one(pool).await?;
    let total: i64 = row.try_get(0)?;

    let mut quality = Vec::with_capacity(ALERT_COLUMNS.len());
    for (i, column) in ALERT_COLUMNS.iter().enumerate() {
        let non_null_count: i64 = row.try_get(i + 1)?;
        let null_count = total - non_null_count;
        quality.push(ColumnQuality {
            column: column.to_string(),
            non_null_count,
            null_count,
            null_percentage: percentage(null_count, total),
        });
    }

    Ok(quality)
}

/// Format an instant the way SQLite's date functions parse it (UTC).
fn sql_instant(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// SQLite treats a negative LIMIT as unlimited.
fn sql_limit(limit: Option<u32>) -> i64 {
    limit.map(i64::from).unwrap_or(-1)
}

fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
}
