//! High-level entry point bundling the codec with batch settings.

use std::io::Read;

use crate::geohash::{self, DecodedLocation, GeohashError};
use crate::ping::{self, BatchError, BatchReport, BatchResult, City, DecodedPing, PingRecord};
use crate::settings::BatchSettings;

/// Core interface for geoping functionality.
///
/// Holds the [`BatchSettings`] that drive encoding precision, batch failure
/// policy, parallelism, and city lookup.
///
/// # Examples
///
/// ```
/// use geoping_core::Geoping;
///
/// let core = Geoping::new();
/// let loc = core.decode("9q5cfj59").unwrap();
/// assert_eq!(core.encode(loc.lat, loc.lng).unwrap(), "9q5cfj59");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Geoping {
    settings: BatchSettings,
}

impl Geoping {
    /// Creates a new `Geoping` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `Geoping` with the given settings.
    #[must_use]
    pub const fn with_settings(settings: BatchSettings) -> Self {
        Self { settings }
    }

    /// Gets the current settings.
    #[must_use]
    pub const fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Replaces the settings.
    pub fn set_settings(&mut self, settings: BatchSettings) {
        self.settings = settings;
    }

    /// Decodes a single geohash.
    ///
    /// # Errors
    ///
    /// See [`geohash::decode`].
    pub fn decode(&self, geohash: &str) -> Result<DecodedLocation, GeohashError> {
        geohash::decode(geohash)
    }

    /// Encodes a coordinate at the configured precision.
    ///
    /// # Errors
    ///
    /// See [`geohash::encode`].
    pub fn encode(&self, lat: f64, lng: f64) -> Result<String, GeohashError> {
        geohash::encode(lat, lng, self.settings.precision)
    }

    /// Decodes a batch of records under the configured policy.
    ///
    /// # Errors
    ///
    /// See [`ping::decode_batch`].
    pub fn decode_records(&self, records: &[PingRecord]) -> BatchResult<BatchReport> {
        ping::decode_batch(records, &self.settings)
    }

    /// Reads rows from `reader` and decodes them.
    ///
    /// Rows that fail to parse go through the failure policy just like rows
    /// that fail to decode.
    ///
    /// # Errors
    ///
    /// See [`ping::read_rows`] and [`ping::decode_rows`].
    pub fn decode_reader<R: Read>(&self, reader: R) -> BatchResult<BatchReport> {
        let rows = ping::read_rows(reader)?;
        ping::decode_rows(&rows, &self.settings)
    }

    /// Resolves a city by name, configured cities first.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::UnknownCity`] if no city matches.
    pub fn city(&self, name: &str) -> BatchResult<City> {
        self.settings
            .find_city(name)
            .ok_or_else(|| BatchError::UnknownCity(name.to_string()))
    }

    /// Keeps the decoded pings that fall inside the named city.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::UnknownCity`] if no city matches.
    pub fn in_city<'a>(
        &self,
        report: &'a BatchReport,
        name: &str,
    ) -> BatchResult<Vec<&'a DecodedPing>> {
        let city = self.city(name)?;
        Ok(ping::filter_by_city(&report.decoded, &city))
    }
}
