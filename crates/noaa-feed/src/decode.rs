//! Decoding of feed features into a fixed alert shape.
//!
//! A feature is a GeoJSON object whose `properties` carry the alert fields
//! under the feed's camelCase names. Only the identifier is required; every
//! other field falls back to `None` and is recorded on the decoded alert so
//! callers can see exactly which fields were absent.

use std::fmt;

use chrono::DateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Optional alert fields read from a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlertField {
    AreaDesc,
    Event,
    Severity,
    Certainty,
    Urgency,
    Headline,
    Description,
    Instruction,
    Sent,
    Effective,
    Expires,
    Status,
    MessageType,
    SenderName,
    Web,
    GeometryType,
}

impl AlertField {
    /// Key of the field in the feed's `properties` map.
    pub fn feed_name(&self) -> &'static str {
        match self {
            AlertField::AreaDesc => "areaDesc",
            AlertField::Event => "event",
            AlertField::Severity => "severity",
            AlertField::Certainty => "certainty",
            AlertField::Urgency => "urgency",
            AlertField::Headline => "headline",
            AlertField::Description => "description",
            AlertField::Instruction => "instruction",
            AlertField::Sent => "sent",
            AlertField::Effective => "effective",
            AlertField::Expires => "expires",
            AlertField::Status => "status",
            AlertField::MessageType => "messageType",
            AlertField::SenderName => "senderName",
            AlertField::Web => "web",
            AlertField::GeometryType => "geometry.type",
        }
    }

    /// Local column name.
    pub fn column_name(&self) -> &'static str {
        match self {
            AlertField::AreaDesc => "area_desc",
            AlertField::Event => "event",
            AlertField::Severity => "severity",
            AlertField::Certainty => "certainty",
            AlertField::Urgency => "urgency",
            AlertField::Headline => "headline",
            AlertField::Description => "description",
            AlertField::Instruction => "instruction",
            AlertField::Sent => "sent",
            AlertField::Effective => "effective",
            AlertField::Expires => "expires",
            AlertField::Status => "status",
            AlertField::MessageType => "message_type",
            AlertField::SenderName => "sender_name",
            AlertField::Web => "web",
            AlertField::GeometryType => "geometry_type",
        }
    }
}

impl fmt::Display for AlertField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// An alert decoded from one feed feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedAlert {
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
    /// Fields that were absent, null, or not strings.
    pub missing: Vec<AlertField>,
    /// Timestamp fields that were present but not RFC 3339.
    pub invalid: Vec<AlertField>,
}

/// Decode a single feed feature.
pub fn decode_feature(feature: &Value) -> Result<FeedAlert, DecodeError> {
    let feature = feature.as_object().ok_or(DecodeError::NotAnObject)?;
    let properties = feature
        .get("properties")
        .and_then(Value::as_object)
        .ok_or(DecodeError::MissingProperties)?;

    let id = properties
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(DecodeError::MissingId)?
        .to_string();

    let mut reader = FieldReader::new(properties);

    let mut alert = FeedAlert {
        id,
        area_desc: reader.text(AlertField::AreaDesc),
        event: reader.text(AlertField::Event),
        severity: reader.text(AlertField::Severity),
        certainty: reader.text(AlertField::Certainty),
        urgency: reader.text(AlertField::Urgency),
        headline: reader.text(AlertField::Headline),
        description: reader.text(AlertField::Description),
        instruction: reader.text(AlertField::Instruction),
        sent: reader.timestamp(AlertField::Sent),
        effective: reader.timestamp(AlertField::Effective),
        expires: reader.timestamp(AlertField::Expires),
        status: reader.text(AlertField::Status),
        message_type: reader.text(AlertField::MessageType),
        sender_name: reader.text(AlertField::SenderName),
        web: reader.text(AlertField::Web),
        geometry_type: None,
        missing: Vec::new(),
        invalid: Vec::new(),
    };

    // Geometry sits beside properties and is null for zone-based alerts.
    alert.geometry_type = feature
        .get("geometry")
        .and_then(|geometry| geometry.get("type"))
        .and_then(Value::as_str)
        .map(str::to_string);
    if alert.geometry_type.is_none() {
        reader.missing.push(AlertField::GeometryType);
    }

    alert.missing = reader.missing;
    alert.invalid = reader.invalid;
    Ok(alert)
}

/// Reads optional string fields, remembering which ones were unusable.
struct FieldReader<'a> {
    properties: &'a Map<String, Value>,
    missing: Vec<AlertField>,
    invalid: Vec<AlertField>,
}

impl<'a> FieldReader<'a> {
    fn new(properties: &'a Map<String, Value>) -> Self {
        Self {
            properties,
            missing: Vec::new(),
            invalid: Vec::new(),
        }
    }

    fn text(&mut self, field: AlertField) -> Option<String> {
        match self.properties.get(field.feed_name()).and_then(Value::as_str) {
            Some(value) => Some(value.to_string()),
            None => {
                self.missing.push(field);
                None
            }
        }
    }

    fn timestamp(&mut self, field: AlertField) -> Option<String> {
        let value = self.text(field)?;
        if DateTime::parse_from_rfc3339(value.trim()).is_ok() {
            Some(value.trim().to_string())
        } else {
            self.invalid.push(field);
            None
        }
    }
}
