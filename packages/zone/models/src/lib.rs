#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Zone and coordinate types for the zone map.
//!
//! A [`Zone`] is a named, identified area of interest that the user drew,
//! searched for, or typed in by hand. The registry in `zone_map_registry`
//! is the only component that creates or mutates zones; everything else
//! receives clones.

pub mod date;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use date::DateRange;

/// Minimum valid latitude (inclusive).
pub const MIN_LATITUDE: f64 = -90.0;
/// Maximum valid latitude (inclusive).
pub const MAX_LATITUDE: f64 = 90.0;
/// Minimum valid longitude (inclusive).
pub const MIN_LONGITUDE: f64 = -180.0;
/// Maximum valid longitude (inclusive).
pub const MAX_LONGITUDE: f64 = 180.0;

/// Minimum number of vertices in a stored ring.
pub const MIN_RING_POINTS: usize = 3;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Registry-assigned zone identifier (e.g. `"zone-3"`).
///
/// Identifiers come from a per-registry counter and are never reused.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Builds the identifier for the `n`th zone a registry has created.
    #[must_use]
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("zone-{n}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Opaque handle the map provider issues for a shape it is drawing.
///
/// Used to recognise re-delivered completion events for a shape that is
/// already registered. Never stored on a [`Zone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingHandle(pub u64);

impl std::fmt::Display for DrawingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// How a zone came into existence.
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
#[strum(ascii_case_insensitive)]
pub enum ZoneKind {
    /// Freehand polygon drawn vertex by vertex.
    Polygon,
    /// Axis-aligned rectangle, stored as a 4-point ring.
    Rectangle,
    /// Bounding region resolved from a location search.
    Region,
}

/// A named, identified area of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Registry-assigned identifier.
    pub id: ZoneId,
    /// Display name shown in tabs and reports.
    pub name: String,
    /// Origin of the zone.
    pub kind: ZoneKind,
    /// Boundary vertices in drawing order, implicitly closed.
    pub ring: Vec<LatLng>,
    /// Arithmetic mean of the ring's vertices.
    pub centroid: LatLng,
}

/// Unit system for distances and areas in reports.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Units {
    /// Square kilometers.
    #[default]
    Metric,
    /// Square miles.
    Imperial,
}

impl Units {
    /// Capitalized label for report output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Metric => "Metric",
            Self::Imperial => "Imperial",
        }
    }
}

/// Base map style the user had selected.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MapType {
    /// Default street map.
    #[default]
    Roadmap,
    /// Satellite imagery.
    Satellite,
    /// Terrain shading.
    Terrain,
    /// Satellite imagery with labels.
    Hybrid,
}

impl MapType {
    /// Capitalized label for report output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Roadmap => "Roadmap",
            Self::Satellite => "Satellite",
            Self::Terrain => "Terrain",
            Self::Hybrid => "Hybrid",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn zone_kind_display_is_human_readable() {
        assert_eq!(ZoneKind::Polygon.to_string(), "Polygon");
        assert_eq!(ZoneKind::Rectangle.to_string(), "Rectangle");
        assert_eq!(ZoneKind::Region.to_string(), "Region");
    }

    #[test]
    fn zone_kind_parses_case_insensitively() {
        assert_eq!(ZoneKind::from_str("rectangle").unwrap(), ZoneKind::Rectangle);
        assert_eq!(ZoneKind::from_str("POLYGON").unwrap(), ZoneKind::Polygon);
        assert!(ZoneKind::from_str("circle").is_err());
    }

    #[test]
    fn zone_ids_follow_sequence() {
        assert_eq!(ZoneId::from_sequence(3).as_str(), "zone-3");
        assert_eq!(ZoneId::from_sequence(12).to_string(), "zone-12");
    }

    #[test]
    fn zone_serializes_camel_case() {
        let zone = Zone {
            id: ZoneId::from_sequence(1),
            name: "Polygon 1".to_owned(),
            kind: ZoneKind::Polygon,
            ring: vec![LatLng::new(0.0, 0.0)],
            centroid: LatLng::new(0.0, 0.0),
        };
        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["id"], "zone-1");
        assert_eq!(json["kind"], "polygon");
        assert_eq!(json["centroid"]["lat"], 0.0);
    }

    #[test]
    fn units_and_map_type_labels() {
        assert_eq!(Units::Imperial.to_string(), "imperial");
        assert_eq!(Units::Imperial.label(), "Imperial");
        assert_eq!(MapType::from_str("Satellite").unwrap(), MapType::Satellite);
        assert_eq!(MapType::Hybrid.label(), "Hybrid");
    }
}
