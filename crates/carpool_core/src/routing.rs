//! Pluggable route providers and the per-driver route builder.
//!
//! Three implementations, selectable via [`RouteProviderKind`]:
//!
//! - **`StraightLineRouteProvider`**: connects the waypoints directly. Zero dependencies.
//! - **`OsrmRouteProvider`** (feature `osrm`): calls an OSRM HTTP endpoint.
//! - **`OpenRouteServiceProvider`** (feature `ors`): calls the openrouteservice directions API.
//!
//! Every provider returns a `Result` so the builder can record *why* a driver has
//! no path; one driver's failure never stops the others.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::spatial::{path_length_miles, Coordinate};

pub mod builder;
pub mod error;

#[cfg(feature = "osrm")]
pub mod osrm;

#[cfg(feature = "ors")]
pub mod ors;

pub use builder::{build_routes, waypoints_for, DriverRoute, RoutePlan};
pub use error::RouteError;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Travel mode requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteProfile {
    #[default]
    Driving,
}

impl RouteProfile {
    /// Profile segment used in OSRM URLs.
    pub fn osrm_name(self) -> &'static str {
        match self {
            RouteProfile::Driving => "driving",
        }
    }

    /// Profile segment used by openrouteservice.
    pub fn ors_name(self) -> &'static str {
        match self {
            RouteProfile::Driving => "driving-car",
        }
    }
}

/// A drivable path through an ordered list of waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Polyline vertices along the road, first to last.
    pub path: Vec<Coordinate>,
    pub distance_miles: f64,
    pub duration_secs: f64,
}

/// Which routing backend to use.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteProviderKind {
    /// Direct segments between waypoints, no network access.
    #[default]
    StraightLine,
    /// OSRM HTTP endpoint (e.g. `"http://localhost:5000"`).
    Osrm { endpoint: String },
    /// openrouteservice with an API key.
    OpenRouteService {
        api_key: String,
        #[serde(default = "default_ors_endpoint")]
        endpoint: String,
    },
}

pub fn default_ors_endpoint() -> String {
    "https://api.openrouteservice.org".to_string()
}

/// Trait for routing backends.
pub trait RouteProvider: Send + Sync {
    /// Route through `waypoints` in the given order. Providers never reorder stops.
    fn route(
        &self,
        waypoints: &[Coordinate],
        profile: RouteProfile,
    ) -> Result<RouteGeometry, RouteError>;
}

// ---------------------------------------------------------------------------
// Straight-line provider (always available)
// ---------------------------------------------------------------------------

/// Average speed used to estimate straight-line durations (mph).
const NOMINAL_SPEED_MPH: f64 = 25.0;

/// Joins waypoints with geodesic segments.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineRouteProvider;

impl RouteProvider for StraightLineRouteProvider {
    fn route(
        &self,
        waypoints: &[Coordinate],
        _profile: RouteProfile,
    ) -> Result<RouteGeometry, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }
        let distance_miles = path_length_miles(waypoints);
        Ok(RouteGeometry {
            path: waypoints.to_vec(),
            distance_miles,
            duration_secs: distance_miles / NOMINAL_SPEED_MPH * 3600.0,
        })
    }
}

// ---------------------------------------------------------------------------
// Factory: build a provider from RouteProviderKind
// ---------------------------------------------------------------------------

/// Construct a boxed [`RouteProvider`] from a [`RouteProviderKind`] descriptor.
///
/// A kind whose feature is compiled out falls back to the straight-line
/// provider with a warning.
pub fn build_route_provider(
    kind: &RouteProviderKind,
    timeout: Duration,
) -> Result<Box<dyn RouteProvider>, RouteError> {
    match kind {
        RouteProviderKind::StraightLine => Ok(Box::new(StraightLineRouteProvider)),

        #[cfg(feature = "osrm")]
        RouteProviderKind::Osrm { endpoint } => {
            Ok(Box::new(osrm::OsrmRouteProvider::new(endpoint, timeout)?))
        }

        #[cfg(feature = "ors")]
        RouteProviderKind::OpenRouteService { api_key, endpoint } => Ok(Box::new(
            ors::OpenRouteServiceProvider::new(endpoint, api_key, timeout)?,
        )),

        #[allow(unreachable_patterns)]
        _ => {
            let _ = timeout;
            log::warn!("requested route provider is not compiled in; using straight lines");
            Ok(Box::new(StraightLineRouteProvider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::coord;

    #[test]
    fn straight_line_keeps_waypoint_order() {
        let stops = [coord(0.0, 0.0), coord(0.0, 1.0), coord(1.0, 1.0)];
        let geometry = StraightLineRouteProvider
            .route(&stops, RouteProfile::Driving)
            .expect("route");
        assert_eq!(geometry.path, stops.to_vec());
        assert!(geometry.distance_miles > 0.0);
        assert!(geometry.duration_secs > 0.0);
    }

    #[test]
    fn straight_line_needs_two_points() {
        let result = StraightLineRouteProvider.route(&[coord(0.0, 0.0)], RouteProfile::Driving);
        assert_eq!(result, Err(RouteError::TooFewWaypoints(1)));
    }

    #[test]
    fn provider_kind_round_trips_through_json() {
        let kind: RouteProviderKind =
            serde_json::from_str(r#"{"kind": "open_route_service", "api_key": "k"}"#).unwrap();
        assert_eq!(
            kind,
            RouteProviderKind::OpenRouteService {
                api_key: "k".into(),
                endpoint: default_ors_endpoint(),
            }
        );
        assert_eq!(RouteProviderKind::default(), RouteProviderKind::StraightLine);
    }

    #[test]
    fn factory_builds_straight_line() {
        let provider =
            build_route_provider(&RouteProviderKind::StraightLine, Duration::from_secs(1))
                .expect("provider");
        assert!(provider
            .route(&[coord(0.0, 0.0), coord(0.1, 0.1)], RouteProfile::Driving)
            .is_ok());
    }
}
