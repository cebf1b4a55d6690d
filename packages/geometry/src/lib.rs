#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure geometry helpers for zone rings.
//!
//! Validation, centroid, rectangle normalization, bounding boxes and a
//! rough area estimate. Nothing here holds state; the registry calls
//! these on every create and edit.
//!
//! All values are approximations meant for display. The centroid is the
//! vertex mean rather than the true polygon centroid, and the area uses a
//! flat-earth scale factor around the ring's mean latitude.

use geo::{Area as _, BoundingRect as _, LineString, Polygon};
use zone_map_zone_models::{
    LatLng, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, MIN_RING_POINTS,
};

/// Kilometers per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Square miles per square kilometer.
pub const SQ_MI_PER_SQ_KM: f64 = 0.386_102;

/// Decimal places used when displaying coordinates.
pub const COORDINATE_PRECISION: usize = 6;

/// Reasons a candidate ring is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RingError {
    /// Fewer than three vertices.
    #[error("ring has {count} points, at least 3 required")]
    TooFewPoints {
        /// Number of vertices supplied.
        count: usize,
    },

    /// A latitude outside `[-90, 90]` (or not finite).
    #[error("point {index}: latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Position of the offending vertex.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// A longitude outside `[-180, 180]` (or not finite).
    #[error("point {index}: longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Position of the offending vertex.
        index: usize,
        /// The rejected value.
        value: f64,
    },
}

/// Axis-aligned bounds of a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum latitude.
    pub south: f64,
    /// Minimum longitude.
    pub west: f64,
    /// Maximum latitude.
    pub north: f64,
    /// Maximum longitude.
    pub east: f64,
}

impl Bounds {
    /// South-west corner.
    #[must_use]
    pub const fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    /// North-east corner.
    #[must_use]
    pub const fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    /// The four corners ordered south-west, north-west, north-east,
    /// south-east.
    #[must_use]
    pub const fn corners(&self) -> [LatLng; 4] {
        [
            LatLng::new(self.south, self.west),
            LatLng::new(self.north, self.west),
            LatLng::new(self.north, self.east),
            LatLng::new(self.south, self.east),
        ]
    }
}

/// Returns `true` if the latitude is finite and within `[-90, 90]`.
#[must_use]
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&lat)
}

/// Returns `true` if the longitude is finite and within `[-180, 180]`.
#[must_use]
pub fn is_valid_longitude(lng: f64) -> bool {
    lng.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng)
}

/// Checks a single vertex, reporting `index` on failure.
///
/// # Errors
///
/// Returns [`RingError`] if either component is out of range.
pub fn validate_point(index: usize, point: LatLng) -> Result<(), RingError> {
    if !is_valid_latitude(point.lat) {
        return Err(RingError::LatitudeOutOfRange {
            index,
            value: point.lat,
        });
    }
    if !is_valid_longitude(point.lng) {
        return Err(RingError::LongitudeOutOfRange {
            index,
            value: point.lng,
        });
    }
    Ok(())
}

/// Checks that a ring has at least three in-range vertices.
///
/// # Errors
///
/// Returns [`RingError`] describing the first problem found.
pub fn validate_ring(ring: &[LatLng]) -> Result<(), RingError> {
    if ring.len() < MIN_RING_POINTS {
        return Err(RingError::TooFewPoints { count: ring.len() });
    }
    ring.iter()
        .enumerate()
        .try_for_each(|(index, point)| validate_point(index, *point))
}

/// Arithmetic mean of the ring's latitudes and longitudes.
///
/// Returns `None` for an empty ring.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(ring: &[LatLng]) -> Option<LatLng> {
    if ring.is_empty() {
        return None;
    }

    let (lat_sum, lng_sum) = ring
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    let count = ring.len() as f64;

    Some(LatLng::new(lat_sum / count, lng_sum / count))
}

/// Builds the four corners of the rectangle spanned by two opposite
/// corners, ordered south-west, north-west, north-east, south-east.
///
/// Rectangles crossing the antimeridian are not special-cased.
#[must_use]
pub fn normalize_rectangle(a: LatLng, b: LatLng) -> [LatLng; 4] {
    Bounds {
        south: a.lat.min(b.lat),
        west: a.lng.min(b.lng),
        north: a.lat.max(b.lat),
        east: a.lng.max(b.lng),
    }
    .corners()
}

/// Normalizes an arbitrary ring to the rectangle spanned by its extremes.
///
/// Returns `None` for an empty ring.
#[must_use]
pub fn rectangle_from_ring(ring: &[LatLng]) -> Option<[LatLng; 4]> {
    bounds(ring).map(|b| normalize_rectangle(b.south_west(), b.north_east()))
}

/// Bounding box of the given coordinates, or `None` if empty.
#[must_use]
pub fn bounds(points: &[LatLng]) -> Option<Bounds> {
    let line = to_line_string(points);
    line.bounding_rect().map(|rect| Bounds {
        south: rect.min().y,
        west: rect.min().x,
        north: rect.max().y,
        east: rect.max().x,
    })
}

/// Approximate enclosed area in square kilometers.
///
/// Uses the planar shoelace area in square degrees, scaled by
/// [`KM_PER_DEGREE`] for latitude and `KM_PER_DEGREE * cos(mean lat)` for
/// longitude. Returns `0.0` for rings with fewer than three vertices.
#[must_use]
pub fn approximate_area_sq_km(ring: &[LatLng]) -> f64 {
    if ring.len() < MIN_RING_POINTS {
        return 0.0;
    }

    let polygon = Polygon::new(to_line_string(ring), vec![]);
    let square_degrees = polygon.unsigned_area();

    let mean_lat = centroid(ring).map_or(0.0, |c| c.lat);
    let km_per_degree_lng = KM_PER_DEGREE * mean_lat.to_radians().cos();

    square_degrees * KM_PER_DEGREE * km_per_degree_lng
}

/// Converts square kilometers to square miles.
#[must_use]
pub fn sq_km_to_sq_mi(sq_km: f64) -> f64 {
    sq_km * SQ_MI_PER_SQ_KM
}

/// Formats a coordinate component with six decimal places.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.prec$}", prec = COORDINATE_PRECISION)
}

/// `geo` uses x = longitude, y = latitude.
fn to_line_string(points: &[LatLng]) -> LineString<f64> {
    points
        .iter()
        .map(|p| (p.lng, p.lat))
        .collect::<Vec<_>>()
        .into()
}
