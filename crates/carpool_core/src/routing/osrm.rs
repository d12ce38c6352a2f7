//! OSRM `/route` client.

use std::time::Duration;

use reqwest::{blocking::Client, Url};
use serde::Deserialize;

use super::{RouteError, RouteGeometry, RouteProfile, RouteProvider};
use crate::spatial::{Coordinate, METERS_PER_MILE};

/// Routes via an OSRM HTTP endpoint.
#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    client: Client,
    endpoint: String,
}

impl OsrmRouteProvider {
    /// Create a provider for the given endpoint (e.g. `http://localhost:5000`).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RouteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RouteError::Http(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn route_url(&self, waypoints: &[Coordinate], profile: RouteProfile) -> Result<Url, RouteError> {
        let coord_segment = waypoints
            .iter()
            .map(|c| format!("{},{}", c.lon(), c.lat()))
            .collect::<Vec<_>>()
            .join(";");
        let base = format!(
            "{}/route/v1/{}/{}",
            self.endpoint,
            profile.osrm_name(),
            coord_segment
        );
        let mut url = Url::parse(&base)
            .map_err(|err| RouteError::Api(format!("failed to build OSRM URL: {}", err)))?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }
}

/// Minimal OSRM JSON response structures.
#[derive(Deserialize)]
pub(crate) struct OsrmResponse {
    code: String,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64, // metres
    duration: f64, // seconds
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>, // [lng, lat]
}

pub(crate) fn parse_route_response(resp: OsrmResponse) -> Result<RouteGeometry, RouteError> {
    if resp.code != "Ok" {
        return Err(RouteError::Api(resp.code));
    }

    let route = resp
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or(RouteError::NoRoute)?;

    let path = route
        .geometry
        .coordinates
        .iter()
        .map(|&[lng, lat]| Coordinate::new(lat, lng))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| RouteError::Json(err.to_string()))?;

    Ok(RouteGeometry {
        path,
        distance_miles: route.distance / METERS_PER_MILE,
        duration_secs: route.duration,
    })
}

impl RouteProvider for OsrmRouteProvider {
    fn route(
        &self,
        waypoints: &[Coordinate],
        profile: RouteProfile,
    ) -> Result<RouteGeometry, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }

        let url = self.route_url(waypoints, profile)?;
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| RouteError::Http(err.to_string()))?;
        let parsed: OsrmResponse = response
            .json()
            .map_err(|err| RouteError::Json(err.to_string()))?;
        parse_route_response(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::coord;

    fn parse(json: &str) -> Result<RouteGeometry, RouteError> {
        parse_route_response(serde_json::from_str(json).expect("fixture json"))
    }

    #[test]
    fn parses_geojson_route() {
        let geometry = parse(
            r#"{"code":"Ok","routes":[{"distance":1609.344,"duration":120.0,
                "geometry":{"type":"LineString","coordinates":[[-75.16,39.95],[-75.17,39.96]]}}]}"#,
        )
        .expect("route");
        assert_eq!(geometry.path, vec![coord(39.95, -75.16), coord(39.96, -75.17)]);
        assert!((geometry.distance_miles - 1.0).abs() < 1e-9);
        assert_eq!(geometry.duration_secs, 120.0);
    }

    #[test]
    fn non_ok_code_is_an_api_error() {
        assert_eq!(
            parse(r#"{"code":"NoSegment","routes":null}"#),
            Err(RouteError::Api("NoSegment".into()))
        );
    }

    #[test]
    fn empty_routes_means_no_route() {
        assert_eq!(parse(r#"{"code":"Ok","routes":[]}"#), Err(RouteError::NoRoute));
    }

    #[test]
    fn url_lists_lng_lat_pairs_in_order() {
        let provider =
            OsrmRouteProvider::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        let url = provider
            .route_url(&[coord(1.0, 2.0), coord(3.0, 4.0)], RouteProfile::Driving)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/route/v1/driving/2,1;4,3?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn single_waypoint_fails_without_network() {
        let provider = OsrmRouteProvider::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert_eq!(
            provider.route(&[coord(0.0, 0.0)], RouteProfile::Driving),
            Err(RouteError::TooFewWaypoints(1))
        );
    }
}
