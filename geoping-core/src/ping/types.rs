//! Ping record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::RowError;
use crate::geohash::{self, BoundingBox, DecodedLocation, GeohashError};

/// Columns written by [`DecodedLocation`] into every decoded row.
const DECODED_COLUMNS: [&str; 4] = ["lat", "lng", "lat_error", "lng_error"];

/// Outcome of reading one input row: a record, or why it could not be parsed.
pub type ParsedRow = Result<PingRecord, RowError>;

/// One anonymized location ping.
///
/// Only `geohash8` is required. Every other column of the input row is kept
/// verbatim in `extra` and written back out next to the decoded fields.
///
/// # Example
///
/// ```
/// use geoping_core::PingRecord;
///
/// let record = PingRecord::from_json(
///     r#"{"geohash8":"9q5cfj59","id":"p-1","device_class":"phone"}"#,
/// ).unwrap();
/// assert_eq!(record.id.as_deref(), Some("p-1"));
/// assert_eq!(record.extra["device_class"], "phone");
///
/// let ping = record.decode().unwrap();
/// assert!((ping.location.lat - 34.0853).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingRecord {
    /// Geohash of the ping position
    pub geohash8: String,

    /// Anonymized record identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the ping was recorded (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Remaining columns, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PingRecord {
    /// Creates a record with only a geohash.
    #[must_use]
    pub fn new(geohash8: impl Into<String>) -> Self {
        Self {
            geohash8: geohash8.into(),
            id: None,
            timestamp: None,
            extra: Map::new(),
        }
    }

    /// Decodes the `geohash8` column and attaches the result to the row.
    ///
    /// Passthrough columns named like a decoded field (`lat`, `lng`,
    /// `lat_error`, `lng_error`) are renamed with an `input_` prefix so the
    /// output object never repeats a key.
    ///
    /// # Errors
    ///
    /// Returns the codec error for an empty or malformed geohash.
    pub fn decode(&self) -> Result<DecodedPing, GeohashError> {
        let location = geohash::decode(&self.geohash8)?;
        let mut record = self.clone();
        record.extra = rename_decoded_columns(std::mem::take(&mut record.extra));
        Ok(DecodedPing { record, location })
    }

    /// Creates a `PingRecord` from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or `geohash8` is missing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn rename_decoded_columns(mut extra: Map<String, Value>) -> Map<String, Value> {
    for column in DECODED_COLUMNS {
        if let Some(value) = extra.remove(column) {
            let mut renamed = format!("input_{column}");
            while extra.contains_key(&renamed) {
                renamed.insert_str(0, "input_");
            }
            extra.insert(renamed, value);
        }
    }
    extra
}

/// A ping augmented with its decoded position.
///
/// Serializes as a single flat object: the record's columns followed by
/// `lat`, `lng`, `lat_error` and `lng_error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedPing {
    /// The input row
    #[serde(flatten)]
    pub record: PingRecord,

    /// Decoded cell center and error bounds
    #[serde(flatten)]
    pub location: DecodedLocation,
}

impl DecodedPing {
    /// Converts this ping to a single-line JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (only with non-string map keys,
    /// which `extra` cannot hold).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A row that was dropped under [`FailurePolicy::Skip`](crate::FailurePolicy::Skip).
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Zero-based row index in the input
    pub index: usize,
    /// The raw geohash, if the row got far enough to have one
    pub geohash: Option<String>,
    /// Why it failed
    pub error: RowError,
}

/// Outcome of decoding a batch of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Decoded pings, in input order
    pub decoded: Vec<DecodedPing>,
    /// Rows that failed to parse or decode, in input order
    pub skipped: Vec<SkippedRow>,
}

impl BatchReport {
    /// Total number of rows seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.decoded.len() + self.skipped.len()
    }

    /// Smallest box containing every decoded ping center.
    #[must_use]
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.decoded
                .iter()
                .map(|p| (p.location.lat, p.location.lng)),
        )
    }
}
