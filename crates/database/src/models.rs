//! Database models.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored weather alert, one row per feed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WeatherAlert {
    /// Identifier issued by the feed (e.g., "urn:oid:2.49.0.1.840.0.abc...").
    pub id: String,
    pub area_desc: Option<String>,
    pub event: Option<String>,
    pub severity: Option<String>,
    pub certainty: Option<String>,
    pub urgency: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    /// ISO-8601 timestamp as sent by the feed.
    pub sent: Option<String>,
    pub effective: Option<String>,
    pub expires: Option<String>,
    /// "Actual", "Exercise", "System", "Test" or "Draft".
    pub status: Option<String>,
    pub message_type: Option<String>,
    pub sender_name: Option<String>,
    pub web: Option<String>,
    pub geometry_type: Option<String>,
    /// Local insertion timestamp. Kept across upserts.
    pub created_at: String,
}

/// Alert fields written by an upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWeatherAlert {
    pub id: String,
    pub area_desc: Option<String>,
    pub event: Option<String>,
    pub severity: Option<String>,
    pub certainty: Option<String>,
    pub urgency: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub sent: Option<String>,
    pub effective: Option<String>,
    pub expires: Option<String>,
    pub status: Option<String>,
    pub message_type: Option<String>,
    pub sender_name: Option<String>,
    pub web: Option<String>,
    pub geometry_type: Option<String>,
}

impl NewWeatherAlert {
    /// Create an alert with only its identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Alert severity as issued by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
    Extreme,
    Unknown,
}

impl Severity {
    /// Parse a feed value. Unrecognized values map to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Minor" => Severity::Minor,
            "Moderate" => Severity::Moderate,
            "Severe" => Severity::Severe,
            "Extreme" => Severity::Extreme,
            _ => Severity::Unknown,
        }
    }

    /// Get the stored column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::Extreme => "Extreme",
            Severity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert urgency as issued by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Immediate,
    Expected,
    Future,
    Past,
    Unknown,
}

impl Urgency {
    /// Parse a feed value. Unrecognized values map to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Immediate" => Urgency::Immediate,
            "Expected" => Urgency::Expected,
            "Future" => Urgency::Future,
            "Past" => Urgency::Past,
            _ => Urgency::Unknown,
        }
    }

    /// Get the stored column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "Immediate",
            Urgency::Expected => "Expected",
            Urgency::Future => "Future",
            Urgency::Past => "Past",
            Urgency::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert count for one event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventCount {
    pub event: String,
    pub alert_count: i64,
}

/// Share of alerts at one severity level. `None` groups rows with no severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SeverityShare {
    pub severity: Option<String>,
    pub alert_count: i64,
    /// Percentage of all stored alerts, rounded to 2 places.
    pub percentage: f64,
}

/// Alerts whose area mentions Texas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TexasSummary {
    pub texas_alerts: i64,
    /// Subset sent after the reference instant minus 7 days. No upper bound.
    pub texas_alerts_this_week: i64,
}

/// Expiration bucket of an alert relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpirationStatus {
    #[serde(rename = "No Expiration Set")]
    NoExpirationSet,
    Expired,
    Active,
}

impl ExpirationStatus {
    /// Label used in the report and in SQL.
    pub fn label(&self) -> &'static str {
        match self {
            ExpirationStatus::NoExpirationSet => "No Expiration Set",
            ExpirationStatus::Expired => "Expired",
            ExpirationStatus::Active => "Active",
        }
    }

    /// Parse a label produced by the expiration query.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "No Expiration Set" => Some(ExpirationStatus::NoExpirationSet),
            "Expired" => Some(ExpirationStatus::Expired),
            "Active" => Some(ExpirationStatus::Active),
            _ => None,
        }
    }
}

impl fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count of alerts in one expiration bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationCount {
    pub status: ExpirationStatus,
    pub count: i64,
}

/// Active alert count for one area description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AreaCount {
    pub area_desc: String,
    pub active_alerts: i64,
}

/// An immediate, severe-or-worse alert that has not expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UrgentAlert {
    pub id: String,
    pub event: Option<String>,
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub urgency: Option<String>,
    pub expires: Option<String>,
    /// Whole minutes until `expires`; `None` when the alert has no expiry.
    pub minutes_until_expiration: Option<i64>,
}

/// Headline counts over the whole table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SummaryStats {
    pub total_alerts: i64,
    pub actual_alerts: i64,
    pub test_alerts: i64,
    pub immediate_alerts: i64,
    pub severe_alerts: i64,
    pub extreme_alerts: i64,
}

/// Null counts for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnQuality {
    pub column: String,
    pub non_null_count: i64,
    pub null_count: i64,
    pub null_percentage: f64,
}
