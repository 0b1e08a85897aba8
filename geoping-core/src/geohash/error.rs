//! Error types for geohash encoding and decoding.

use thiserror::Error;

/// Error type for geohash codec operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeohashError {
    /// A character outside the base-32 geohash alphabet.
    #[error("Invalid geohash character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Zero-based character position in the input.
        position: usize,
    },

    /// Zero-length geohash.
    #[error("Geohash is empty")]
    EmptyInput,

    /// Requested encode precision of zero.
    #[error("Invalid geohash precision: {0}")]
    InvalidPrecision(usize),

    /// Coordinate outside the valid latitude/longitude range, or not finite.
    #[error("Coordinate out of range: lat={lat}, lng={lng}")]
    OutOfRange {
        /// Latitude as given.
        lat: f64,
        /// Longitude as given.
        lng: f64,
    },
}

/// Result type alias for geohash operations.
pub type Result<T> = std::result::Result<T, GeohashError>;
