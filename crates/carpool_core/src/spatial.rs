//! Spatial primitives: validated coordinates and geodesic distance.
//!
//! Distances are only ever used to rank candidate drivers against each other, so
//! the metric favours consistency (symmetric, ellipsoidal) over raw speed.

use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Reasons a latitude/longitude pair is rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("coordinate components must be finite numbers")]
    NonFinite,
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS-84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(coord: Coordinate) -> Self {
        Self {
            lat: coord.lat,
            lon: coord.lon,
        }
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting values no geocoder could have produced.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// `geo` points are (x = longitude, y = latitude).
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Geodesic distance in miles between two coordinates.
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    point_distance_miles(a.to_point(), b.to_point())
}

/// Same metric on pre-converted points, for hot loops that reuse driver positions.
pub(crate) fn point_distance_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    Geodesic.distance(a, b) / METERS_PER_MILE
}

/// Total geodesic length of a polyline in miles.
pub fn path_length_miles(path: &[Coordinate]) -> f64 {
    path.windows(2)
        .map(|pair| distance_miles(pair[0], pair[1]))
        .sum()
}
