//! Error types for ping batch operations.

use thiserror::Error;

use crate::geohash::GeohashError;

/// Why a single input row produced no decoded ping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// The row parsed but its geohash did not decode.
    #[error(transparent)]
    Geohash(#[from] GeohashError),

    /// The row is not valid JSON or does not fit the record shape.
    #[error("Malformed record ({location}): {message}")]
    Malformed {
        /// Where the row sits in the input, e.g. `line 3`.
        location: String,
        /// The raw `geohash8` value, when it could be recovered.
        geohash: Option<String>,
        /// The parse failure.
        message: String,
    },
}

impl RowError {
    /// The raw geohash of the failing row, if known.
    #[must_use]
    pub fn geohash(&self) -> Option<&str> {
        match self {
            Self::Geohash(_) => None,
            Self::Malformed { geohash, .. } => geohash.as_deref(),
        }
    }
}

/// Error type for batch ingestion and decoding.
#[derive(Error, Debug)]
pub enum BatchError {
    /// A row failed under [`FailurePolicy::Abort`](crate::FailurePolicy::Abort).
    #[error("Row {index} ({geohash:?}) failed: {source}")]
    Row {
        /// Zero-based row index in the input.
        index: usize,
        /// The raw geohash of the failing row, if known.
        geohash: Option<String>,
        /// The row failure.
        #[source]
        source: RowError,
    },

    /// Input record could not be parsed.
    #[error("Malformed record on line {line}: {source}")]
    Parse {
        /// One-based line number of the record.
        line: usize,
        /// The JSON parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No built-in or configured city has this name.
    #[error("Unknown city: {0}")]
    UnknownCity(String),
}

/// Result type alias for batch operations.
pub type BatchResult<T> = std::result::Result<T, BatchError>;
