//! Geohash codec.
//!
//! Converts between base-32 geohash strings and latitude/longitude cells:
//! - Decoding to the cell center with latitude/longitude error bounds
//! - Encoding a coordinate to a geohash of a requested length
//! - Cell bounding boxes and approximate error radius in meters
//!
//! The codec is stateless. Every call works on call-local intervals, so it can
//! be used from any number of threads without synchronization.
//!
//! # Example Usage
//!
//! ```
//! use geoping_core::geohash::{decode, encode, GeohashError};
//!
//! let loc = decode("9q5cfj59").unwrap();
//! println!("{}, {} (±{}, ±{})", loc.lat, loc.lng, loc.lat_error, loc.lng_error);
//!
//! // Re-encoding the center yields the same cell
//! assert_eq!(encode(loc.lat, loc.lng, 8).unwrap(), "9q5cfj59");
//!
//! // Failures are reported per call
//! assert_eq!(decode(""), Err(GeohashError::EmptyInput));
//! ```

mod codec;
mod error;
mod types;

pub use codec::{cell_error, decode, decode_bbox, encode, error_radius_meters, ALPHABET};
pub use error::{GeohashError, Result};
pub use types::{validate_coordinate, BoundingBox, DecodedLocation, Interval, LAT_RANGE, LNG_RANGE};
