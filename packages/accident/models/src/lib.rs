#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Road accident record types.
//!
//! [`RoadAccident`] is the canonical in-memory row produced by the loader
//! and consumed by the query engine. Records are immutable once loaded.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A single road incident with its location, conditions, and the
/// administrative region it is attributed to.
///
/// Categorical attributes are kept as the strings found in the source
/// data. A missing value is represented by the empty string, which is a
/// regular grouping key like any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadAccident {
    /// Accident identifier from the source dataset.
    pub accident_id: String,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Road surface condition (e.g. "Dry", "Wet or damp").
    pub road_surface_conditions: String,
    /// Weather condition (e.g. "Fine no high winds", "Raining no high winds").
    pub weather_conditions: String,
    /// District authority responsible for the road.
    pub district_authority: String,
}

impl RoadAccident {
    /// Returns the value of the given categorical attribute.
    #[must_use]
    pub fn field(&self, field: AccidentField) -> &str {
        match field {
            AccidentField::RoadSurfaceConditions => &self.road_surface_conditions,
            AccidentField::WeatherConditions => &self.weather_conditions,
            AccidentField::DistrictAuthority => &self.district_authority,
        }
    }
}

/// Selects one of the categorical attributes of a [`RoadAccident`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccidentField {
    /// Road surface condition.
    RoadSurfaceConditions,
    /// Weather condition.
    WeatherConditions,
    /// District authority.
    DistrictAuthority,
}

impl AccidentField {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::RoadSurfaceConditions,
            Self::WeatherConditions,
            Self::DistrictAuthority,
        ]
    }
}

/// An inclusive longitude/latitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Western edge (inclusive).
    pub min_longitude: f64,
    /// Eastern edge (inclusive).
    pub max_longitude: f64,
    /// Southern edge (inclusive).
    pub min_latitude: f64,
    /// Northern edge (inclusive).
    pub max_latitude: f64,
}

impl BoundingBox {
    /// Creates a box from its four edges, in the order
    /// `min_lon, max_lon, min_lat, max_lat`.
    #[must_use]
    pub const fn new(
        min_longitude: f64,
        max_longitude: f64,
        min_latitude: f64,
        max_latitude: f64,
    ) -> Self {
        Self {
            min_longitude,
            max_longitude,
            min_latitude,
            max_latitude,
        }
    }

    /// Whether the point lies inside the box, edges included.
    ///
    /// Any NaN among the bounds or the point makes every comparison false,
    /// so the point is never contained.
    #[must_use]
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        longitude >= self.min_longitude
            && longitude <= self.max_longitude
            && latitude >= self.min_latitude
            && latitude <= self.max_latitude
    }

    /// Whether no point can ever be contained (inverted range or NaN edge).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.min_longitude <= self.max_longitude && self.min_latitude <= self.max_latitude)
    }
}

/// Number of accidents sharing one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionCount {
    /// The categorical value (e.g. "Raining no high winds").
    pub condition: String,
    /// Number of accidents.
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn accident() -> RoadAccident {
        RoadAccident {
            accident_id: "200501BS00001".to_string(),
            longitude: -0.191_170,
            latitude: 51.489_096,
            road_surface_conditions: "Wet or damp".to_string(),
            weather_conditions: "Raining no high winds".to_string(),
            district_authority: "Kensington and Chelsea".to_string(),
        }
    }

    #[test]
    fn field_selects_matching_attribute() {
        let a = accident();
        assert_eq!(a.field(AccidentField::RoadSurfaceConditions), "Wet or damp");
        assert_eq!(
            a.field(AccidentField::WeatherConditions),
            "Raining no high winds"
        );
        assert_eq!(
            a.field(AccidentField::DistrictAuthority),
            "Kensington and Chelsea"
        );
    }

    #[test]
    fn field_names_roundtrip_through_strum() {
        for field in AccidentField::all() {
            let parsed = AccidentField::from_str(field.as_ref()).unwrap();
            assert_eq!(parsed, *field);
        }
        assert_eq!(
            AccidentField::WeatherConditions.to_string(),
            "weather_conditions"
        );
        assert!(AccidentField::from_str("speed_limit").is_err());
    }

    #[test]
    fn bounding_box_edges_are_inclusive() {
        let bbox = BoundingBox::new(0.0, 6.0, 0.0, 6.0);
        assert!(bbox.contains(0.0, 0.0));
        assert!(bbox.contains(6.0, 6.0));
        assert!(bbox.contains(3.0, 6.0));
        assert!(!bbox.contains(6.000_001, 3.0));
        assert!(!bbox.contains(3.0, -0.000_001));
    }

    #[test]
    fn nan_never_matches() {
        let bbox = BoundingBox::new(f64::NAN, 6.0, 0.0, 6.0);
        assert!(!bbox.contains(3.0, 3.0));
        assert!(bbox.is_degenerate());

        let bbox = BoundingBox::new(0.0, 6.0, 0.0, 6.0);
        assert!(!bbox.contains(f64::NAN, 3.0));
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn inverted_box_is_degenerate() {
        let bbox = BoundingBox::new(6.0, 0.0, 0.0, 6.0);
        assert!(bbox.is_degenerate());
        assert!(!bbox.contains(3.0, 3.0));
    }
}
