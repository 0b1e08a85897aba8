//! Batch settings.

use serde::{Deserialize, Serialize};

use crate::ping::City;

/// What to do with a row that fails to parse or decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Drop the row, log it, and keep going
    #[default]
    Skip,
    /// Stop at the first failing row
    Abort,
}

/// Settings controlling batch decoding.
///
/// Missing fields take their default value when loaded from JSON.
///
/// # Example
///
/// ```
/// use geoping_core::{BatchSettings, FailurePolicy};
///
/// let settings = BatchSettings::from_json(r#"{"policy":"abort"}"#).unwrap();
/// assert_eq!(settings.policy, FailurePolicy::Abort);
/// assert_eq!(settings.precision, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Per-row failure policy
    pub policy: FailurePolicy,

    /// Decode rows on the rayon thread pool (requires the `parallel` feature)
    pub parallel: bool,

    /// Geohash length used when encoding
    pub precision: usize,

    /// Extra cities, checked before the built-in table
    pub cities: Vec<City>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::default(),
            parallel: false,
            precision: 8, // matches the geohash8 column
            cities: Vec::new(),
        }
    }
}

impl BatchSettings {
    /// Resolves a city by name, configured cities first.
    #[must_use]
    pub fn find_city(&self, name: &str) -> Option<City> {
        self.cities
            .iter()
            .find(|c| c.is_named(name))
            .cloned()
            .or_else(|| City::find(name))
    }

    /// Creates `BatchSettings` from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Converts these settings to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (extremely rare).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
