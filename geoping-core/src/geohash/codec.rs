//! Base-32 geohash encoding and decoding.
//!
//! This module provides functions for:
//! - Geohash decoding (cell center plus error bounds)
//! - Geohash encoding (coordinate to a cell of the requested length)
//! - Cell geometry helpers (bounding box, error radius in meters)
//!
//! Bits are interleaved starting with longitude, counted across the whole
//! string rather than per character.

use super::error::{GeohashError, Result};
use super::types::{validate_coordinate, BoundingBox, DecodedLocation, Interval};

/// The 32-symbol geohash alphabet. `a`, `i`, `l` and `o` are not part of it.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

const BITS_PER_CHAR: usize = 5;

/// Halvings after which an f64 half-width has underflowed to zero.
const MAX_HALVINGS: usize = 1100;

/// Approximate length of one degree of latitude in meters.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Maps an ASCII byte to its 5-bit value, or `None` outside the alphabet.
const fn symbol_value(byte: u8) -> Option<u8> {
    let mut i = 0;
    while i < ALPHABET.len() {
        if ALPHABET[i] == byte {
            #[allow(clippy::cast_possible_truncation)]
            return Some(i as u8);
        }
        i += 1;
    }
    None
}

/// Narrows both intervals by every bit of `geohash`.
fn walk(geohash: &str) -> Result<(Interval, Interval)> {
    if geohash.is_empty() {
        return Err(GeohashError::EmptyInput);
    }

    let mut lat = Interval::latitude();
    let mut lng = Interval::longitude();
    let mut narrow_lng = true;

    for (position, character) in geohash.chars().enumerate() {
        let value = u8::try_from(character)
            .ok()
            .and_then(symbol_value)
            .ok_or(GeohashError::InvalidCharacter {
                character,
                position,
            })?;

        for shift in (0..BITS_PER_CHAR).rev() {
            let bit = (value >> shift) & 1 == 1;
            if narrow_lng {
                lng.bisect(bit);
            } else {
                lat.bisect(bit);
            }
            narrow_lng = !narrow_lng;
        }
    }

    Ok((lat, lng))
}

/// Decodes a geohash to the center of its cell and the cell half-widths.
///
/// # Arguments
///
/// * `geohash` - Geohash string, lowercase base-32
///
/// # Examples
///
/// ```
/// use geoping_core::geohash::decode;
///
/// let loc = decode("9q5cfj59").unwrap();
/// assert!((loc.lat - 34.0853).abs() < loc.lat_error);
/// assert!((loc.lng - -118.3837).abs() < loc.lng_error);
/// ```
///
/// # Errors
///
/// - [`GeohashError::EmptyInput`] for an empty string
/// - [`GeohashError::InvalidCharacter`] for any symbol outside [`ALPHABET`]
pub fn decode(geohash: &str) -> Result<DecodedLocation> {
    let (lat, lng) = walk(geohash)?;
    Ok(DecodedLocation::from_intervals(lat, lng))
}

/// Decodes a geohash to the bounding box of its cell.
///
/// # Examples
///
/// ```
/// use geoping_core::geohash::decode_bbox;
///
/// let bbox = decode_bbox("s").unwrap();
/// assert_eq!((bbox.min_lat, bbox.max_lat), (0.0, 45.0));
/// assert_eq!((bbox.min_lng, bbox.max_lng), (0.0, 45.0));
/// ```
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_bbox(geohash: &str) -> Result<BoundingBox> {
    let (lat, lng) = walk(geohash)?;
    Ok(BoundingBox::from_intervals(lat, lng))
}

/// Encodes a coordinate as a geohash of `precision` characters.
///
/// A coordinate exactly on a bisection midpoint goes to the upper half. Any
/// length is accepted, but past roughly 20 characters the f64 intervals stop
/// narrowing and further characters carry no extra precision.
///
/// # Arguments
///
/// * `lat` - Latitude in `[-90, 90]`
/// * `lng` - Longitude in `[-180, 180]`
/// * `precision` - Geohash length, at least 1
///
/// # Examples
///
/// ```
/// use geoping_core::geohash::encode;
///
/// assert_eq!(encode(34.0853, -118.3837, 8).unwrap(), "9q5cfj59");
/// assert_eq!(encode(57.64911, 10.40744, 11).unwrap(), "u4pruydqqvj");
/// ```
///
/// # Errors
///
/// - [`GeohashError::InvalidPrecision`] if `precision` is 0
/// - [`GeohashError::OutOfRange`] if the coordinate is outside the valid range or not finite
pub fn encode(lat: f64, lng: f64, precision: usize) -> Result<String> {
    if precision == 0 {
        return Err(GeohashError::InvalidPrecision(precision));
    }
    validate_coordinate(lat, lng)?;

    let mut lat_iv = Interval::latitude();
    let mut lng_iv = Interval::longitude();
    let mut narrow_lng = true;
    let mut out = String::with_capacity(precision.min(64));

    while out.len() < precision {
        let mut value = 0usize;
        for _ in 0..BITS_PER_CHAR {
            let (iv, target) = if narrow_lng {
                (&mut lng_iv, lng)
            } else {
                (&mut lat_iv, lat)
            };
            let bit = target >= iv.mid();
            iv.bisect(bit);
            value = (value << 1) | usize::from(bit);
            narrow_lng = !narrow_lng;
        }
        out.push(char::from(ALPHABET[value]));
    }

    Ok(out)
}

/// Latitude and longitude half-widths, in degrees, of a cell of `precision` characters.
///
/// Very long precisions saturate at `(0.0, 0.0)`.
#[must_use]
pub fn cell_error(precision: usize) -> (f64, f64) {
    let bits = precision.saturating_mul(BITS_PER_CHAR);
    let lng_bits = bits.div_ceil(2);
    let lat_bits = bits / 2;
    let halve = |span: f64, n: usize| {
        (0..n.min(MAX_HALVINGS)).fold(span, |acc, _| acc / 2.0) / 2.0
    };
    (halve(180.0, lat_bits), halve(360.0, lng_bits))
}

/// Approximate distance in meters from a cell center to its corner.
///
/// Uses equatorial degree lengths, so it is an upper bound away from the equator.
/// Precision 0 has no cell and yields `0.0`.
///
/// # Examples
///
/// ```
/// use geoping_core::geohash::error_radius_meters;
///
/// let r8 = error_radius_meters(8);
/// assert!(r8 > 19.0 && r8 < 22.0);
/// ```
#[must_use]
pub fn error_radius_meters(precision: usize) -> f64 {
    if precision == 0 {
        return 0.0;
    }
    let (lat_err, lng_err) = cell_error(precision);
    (lat_err * METERS_PER_DEGREE).hypot(lng_err * METERS_PER_DEGREE)
}
