//! Coordinator configuration, loadable from JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geocoding::GeocoderKind;
use crate::routing::RouteProviderKind;

/// Default destination when none is configured.
pub const DEFAULT_DESTINATION: &str = "600 Snyder Ave, Philadelphia, PA";

/// Largest seat count a driver may offer.
const DEFAULT_MAX_SEATS: u32 = 10;

const DEFAULT_GEOCODE_CACHE_CAPACITY: usize = 1_000;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Address every route ends at.
    pub destination_address: String,
    /// Upper bound on seats accepted by `add_driver`.
    pub max_seats: u32,
    pub geocoder: GeocoderKind,
    pub route_provider: RouteProviderKind,
    pub geocode_cache_capacity: usize,
    /// Per-request timeout for the HTTP collaborators.
    pub request_timeout_secs: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            destination_address: DEFAULT_DESTINATION.to_string(),
            max_seats: DEFAULT_MAX_SEATS,
            geocoder: GeocoderKind::default(),
            route_provider: RouteProviderKind::default(),
            geocode_cache_capacity: DEFAULT_GEOCODE_CACHE_CAPACITY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl CoordinatorConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn with_destination_address(mut self, address: impl Into<String>) -> Self {
        self.destination_address = address.into();
        self
    }

    pub fn with_max_seats(mut self, max_seats: u32) -> Self {
        self.max_seats = max_seats;
        self
    }

    pub fn with_geocoder(mut self, geocoder: GeocoderKind) -> Self {
        self.geocoder = geocoder;
        self
    }

    pub fn with_route_provider(mut self, route_provider: RouteProviderKind) -> Self {
        self.route_provider = route_provider;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}
