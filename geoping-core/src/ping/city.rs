//! City bounding boxes and filtering.

use serde::{Deserialize, Serialize};

use super::types::DecodedPing;
use crate::geohash::BoundingBox;

/// Built-in city extents as `(name, [min_lat, min_lng, max_lat, max_lng])`.
const BUILTIN_CITIES: &[(&str, [f64; 4])] = &[
    ("Los Angeles", [33.70, -118.67, 34.34, -118.15]),
    ("San Francisco", [37.70, -122.52, 37.83, -122.35]),
    ("New York", [40.48, -74.26, 40.92, -73.70]),
    ("Chicago", [41.64, -87.94, 42.02, -87.52]),
    ("Seattle", [47.49, -122.44, 47.74, -122.24]),
];

/// A named rectangular city extent.
///
/// # Examples
///
/// ```
/// use geoping_core::City;
///
/// let la = City::find("los angeles").unwrap();
/// assert_eq!(la.name, "Los Angeles");
/// assert!(la.bbox.contains(34.0853, -118.3837));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Display name, matched case-insensitively
    pub name: String,
    /// Extent used for filtering
    pub bbox: BoundingBox,
}

impl City {
    /// Creates a city from a name and extent.
    #[must_use]
    pub fn new(name: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bbox,
        }
    }

    /// All built-in cities.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        BUILTIN_CITIES
            .iter()
            .map(|&(name, [min_lat, min_lng, max_lat, max_lng])| {
                Self::new(
                    name,
                    BoundingBox {
                        min_lat,
                        min_lng,
                        max_lat,
                        max_lng,
                    },
                )
            })
            .collect()
    }

    /// Looks up a built-in city, ignoring ASCII case.
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        Self::builtin()
            .into_iter()
            .find(|c| c.is_named(name))
    }

    /// ASCII case-insensitive, surrounding whitespace ignored.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Returns true if the ping's decoded center lies inside this city.
    #[must_use]
    pub fn contains(&self, ping: &DecodedPing) -> bool {
        self.bbox.contains(ping.location.lat, ping.location.lng)
    }
}

/// Keeps the pings whose decoded center falls inside `city`, preserving order.
#[must_use]
pub fn filter_by_city<'a>(pings: &'a [DecodedPing], city: &City) -> Vec<&'a DecodedPing> {
    pings.iter().filter(|p| city.contains(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PingRecord;

    #[test]
    fn builtin_boxes_are_valid() {
        for city in City::builtin() {
            let b = city.bbox;
            assert!(
                BoundingBox::new(b.min_lat, b.min_lng, b.max_lat, b.max_lng).is_ok(),
                "{} has an invalid extent",
                city.name
            );
        }
    }

    #[test]
    fn find_ignores_case_and_whitespace() {
        assert!(City::find("NEW YORK").is_some());
        assert!(City::find("  seattle ").is_some());
        assert!(City::find("Atlantis").is_none());
    }

    #[test]
    fn filter_keeps_only_pings_inside() {
        let pings = vec![
            PingRecord::new("9q5cfj59").decode().unwrap(), // Los Angeles
            PingRecord::new("dr5regw3").decode().unwrap(), // New York
            PingRecord::new("9q5ctr18").decode().unwrap(), // Los Angeles
        ];
        let la = City::find("Los Angeles").unwrap();

        let kept = filter_by_city(&pings, &la);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].record.geohash8, "9q5cfj59");
        assert_eq!(kept[1].record.geohash8, "9q5ctr18");
    }
}
