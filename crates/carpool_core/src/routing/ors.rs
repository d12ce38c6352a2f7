//! openrouteservice directions client (GeoJSON response format).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{RouteError, RouteGeometry, RouteProfile, RouteProvider};
use crate::spatial::{Coordinate, METERS_PER_MILE};

/// Routes via the openrouteservice `/v2/directions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouteServiceProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenRouteServiceProvider {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, RouteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RouteError::Http(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[derive(Serialize)]
struct DirectionsRequest {
    coordinates: Vec<[f64; 2]>, // [lng, lat]
}

#[derive(Deserialize)]
pub(crate) struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: LineGeometry,
    properties: FeatureProperties,
}

#[derive(Deserialize)]
struct LineGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct FeatureProperties {
    summary: Summary,
}

#[derive(Deserialize, Default)]
struct Summary {
    #[serde(default)]
    distance: f64, // metres
    #[serde(default)]
    duration: f64, // seconds
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured { message: String },
    Plain(String),
}

pub(crate) fn parse_directions(collection: FeatureCollection) -> Result<RouteGeometry, RouteError> {
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or(RouteError::NoRoute)?;

    let path = feature
        .geometry
        .coordinates
        .iter()
        .map(|&[lng, lat]| Coordinate::new(lat, lng))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| RouteError::Json(err.to_string()))?;

    Ok(RouteGeometry {
        path,
        distance_miles: feature.properties.summary.distance / METERS_PER_MILE,
        duration_secs: feature.properties.summary.duration,
    })
}

/// Turn a non-2xx body into a readable error, keeping the provider's message when present.
pub(crate) fn describe_failure(status: u16, body: &str) -> RouteError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| match parsed.error {
            ErrorDetail::Structured { message } => message,
            ErrorDetail::Plain(message) => message,
        })
        .unwrap_or_else(|_| body.trim().to_string());
    RouteError::Api(format!("HTTP {}: {}", status, message))
}

impl RouteProvider for OpenRouteServiceProvider {
    fn route(
        &self,
        waypoints: &[Coordinate],
        profile: RouteProfile,
    ) -> Result<RouteGeometry, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }

        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.endpoint,
            profile.ors_name()
        );
        let body = DirectionsRequest {
            coordinates: waypoints.iter().map(|c| [c.lon(), c.lat()]).collect(),
        };

        let response = self
            .client
            .post(url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .map_err(|err| RouteError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(describe_failure(status.as_u16(), &text));
        }

        let parsed: FeatureCollection = response
            .json()
            .map_err(|err| RouteError::Json(err.to_string()))?;
        parse_directions(parsed)
    }
}
