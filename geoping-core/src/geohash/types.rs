//! Geohash data types.

use serde::{Deserialize, Serialize};

use super::error::{GeohashError, Result};

/// Valid latitude range in degrees.
pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees.
pub const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// A closed `[low, high]` range along one axis.
///
/// Geohash decoding narrows one `Interval` per axis, halving it once per bit.
///
/// # Examples
///
/// ```
/// use geoping_core::geohash::Interval;
///
/// let mut lng = Interval::new(-180.0, 180.0);
/// lng.bisect(true);
/// assert_eq!(lng, Interval::new(0.0, 180.0));
/// assert_eq!(lng.mid(), 90.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl Interval {
    /// Creates a new interval. Callers uphold `low <= high`.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The full latitude interval `[-90, 90]`.
    #[must_use]
    pub const fn latitude() -> Self {
        Self::new(LAT_RANGE.0, LAT_RANGE.1)
    }

    /// The full longitude interval `[-180, 180]`.
    #[must_use]
    pub const fn longitude() -> Self {
        Self::new(LNG_RANGE.0, LNG_RANGE.1)
    }

    /// Midpoint of the interval.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Half of the interval width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (self.high - self.low) / 2.0
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Keeps the upper half when `bit` is set, the lower half otherwise.
    pub fn bisect(&mut self, bit: bool) {
        let mid = self.mid();
        if bit {
            self.low = mid;
        } else {
            self.high = mid;
        }
    }
}

/// Result of decoding a geohash: the cell center and its half-widths.
///
/// Serialized with the field names `lat`, `lng`, `lat_error`, `lng_error`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedLocation {
    /// Center latitude of the cell
    pub lat: f64,
    /// Center longitude of the cell
    pub lng: f64,
    /// Half the height of the cell in degrees
    pub lat_error: f64,
    /// Half the width of the cell in degrees
    pub lng_error: f64,
}

impl DecodedLocation {
    pub(crate) fn from_intervals(lat: Interval, lng: Interval) -> Self {
        Self {
            lat: lat.mid(),
            lng: lng.mid(),
            lat_error: lat.half_width(),
            lng_error: lng.half_width(),
        }
    }

    /// Returns true if `(lat, lng)` falls inside the decoded cell.
    #[must_use]
    pub fn covers(&self, lat: f64, lng: f64) -> bool {
        (lat - self.lat).abs() <= self.lat_error && (lng - self.lng).abs() <= self.lng_error
    }

    /// The cell as a bounding box.
    #[must_use]
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox {
            min_lat: self.lat - self.lat_error,
            min_lng: self.lng - self.lng_error,
            max_lat: self.lat + self.lat_error,
            max_lng: self.lng + self.lng_error,
        }
    }
}

/// Axis-aligned latitude/longitude rectangle.
///
/// # Examples
///
/// ```
/// use geoping_core::geohash::BoundingBox;
///
/// let la = BoundingBox::new(33.70, -118.67, 34.34, -118.15).unwrap();
/// assert!(la.contains(34.0853, -118.3837));
/// assert!(!la.contains(40.7128, -74.0060));
/// ```
///
/// Deserialization goes through [`BoundingBox::new`], so an inverted or
/// out-of-range box is rejected when settings are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundingBox")]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Western edge
    pub min_lng: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Eastern edge
    pub max_lng: f64,
}

/// Unvalidated wire form of [`BoundingBox`].
#[derive(Deserialize)]
struct RawBoundingBox {
    min_lat: f64,
    min_lng: f64,
    max_lat: f64,
    max_lng: f64,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = GeohashError;

    fn try_from(raw: RawBoundingBox) -> Result<Self> {
        Self::new(raw.min_lat, raw.min_lng, raw.max_lat, raw.max_lng)
    }
}

impl BoundingBox {
    /// Creates a validated bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`GeohashError::OutOfRange`] if a corner lies outside the valid
    /// coordinate range or if a minimum exceeds its maximum.
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Result<Self> {
        validate_coordinate(min_lat, min_lng)?;
        validate_coordinate(max_lat, max_lng)?;
        if min_lat > max_lat || min_lng > max_lng {
            return Err(GeohashError::OutOfRange {
                lat: min_lat,
                lng: min_lng,
            });
        }
        Ok(Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        })
    }

    pub(crate) const fn from_intervals(lat: Interval, lng: Interval) -> Self {
        Self {
            min_lat: lat.low,
            min_lng: lng.low,
            max_lat: lat.high,
            max_lng: lng.high,
        }
    }

    /// The smallest box containing every point, or `None` if there are none.
    ///
    /// Points are `(lat, lng)` pairs.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (lat, lng)| {
            Some(match acc {
                None => Self {
                    min_lat: lat,
                    min_lng: lng,
                    max_lat: lat,
                    max_lng: lng,
                },
                Some(b) => Self {
                    min_lat: b.min_lat.min(lat),
                    min_lng: b.min_lng.min(lng),
                    max_lat: b.max_lat.max(lat),
                    max_lng: b.max_lng.max(lng),
                },
            })
        })
    }

    /// Inclusive on every edge.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }

    /// Center of the box as `(lat, lng)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Checks that a coordinate is finite and inside the valid ranges.
///
/// # Errors
///
/// Returns [`GeohashError::OutOfRange`] otherwise.
pub fn validate_coordinate(lat: f64, lng: f64) -> Result<()> {
    // RangeInclusive::contains is false for NaN.
    if Interval::latitude().contains(lat) && Interval::longitude().contains(lng) {
        Ok(())
    } else {
        Err(GeohashError::OutOfRange { lat, lng })
    }
}
