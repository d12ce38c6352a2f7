//! Address → coordinate resolution.
//!
//! - **`StaticGeocoder`**: in-memory address table (tests, offline presets).
//! - **`NominatimGeocoder`** (feature `nominatim`): OpenStreetMap Nominatim search API.
//! - **`CachedGeocoder`**: LRU wrapper around any [`Geocoder`].

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::spatial::Coordinate;

#[cfg(feature = "nominatim")]
pub mod nominatim;

/// Why an address could not be turned into a coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    #[error("address is empty")]
    EmptyAddress,
    #[error("address not found: {0}")]
    NotFound(String),
    #[error("geocoding request failed: {0}")]
    Http(String),
    #[error("geocoding provider error: {0}")]
    Api(String),
}

/// Trait for geocoding backends.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

/// Which geocoding backend to use.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeocoderKind {
    Nominatim {
        #[serde(default = "default_nominatim_endpoint")]
        endpoint: String,
        #[serde(default = "default_user_agent")]
        user_agent: String,
    },
    /// Fixed address table; anything else is reported as not found.
    Static {
        #[serde(default)]
        addresses: HashMap<String, Coordinate>,
    },
}

impl Default for GeocoderKind {
    fn default() -> Self {
        GeocoderKind::Nominatim {
            endpoint: default_nominatim_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_nominatim_endpoint() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

pub fn default_user_agent() -> String {
    concat!("carpool/", env!("CARGO_PKG_VERSION")).to_string()
}

// ---------------------------------------------------------------------------
// Static table
// ---------------------------------------------------------------------------

/// Looks addresses up in a fixed table. Keys are matched after trimming and
/// ASCII-lowercasing.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    table: HashMap<String, Coordinate>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: HashMap<String, Coordinate>) -> Self {
        let mut geocoder = Self::new();
        for (address, coordinate) in table {
            geocoder.insert(&address, coordinate);
        }
        geocoder
    }

    pub fn insert(&mut self, address: &str, coordinate: Coordinate) {
        self.table.insert(normalize(address), coordinate);
    }

    pub fn with(mut self, address: &str, coordinate: Coordinate) -> Self {
        self.insert(address, coordinate);
        self
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let key = normalize(address);
        if key.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        self.table
            .get(&key)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound(address.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

/// LRU-cached wrapper around any [`Geocoder`].
///
/// Only successful lookups are cached; failures are retried on the next call.
pub struct CachedGeocoder {
    inner: Box<dyn Geocoder>,
    cache: Mutex<LruCache<String, Coordinate>>,
}

impl CachedGeocoder {
    pub fn new(inner: Box<dyn Geocoder>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl Geocoder for CachedGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let key = normalize(address);

        // Fast path: cache hit
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return Ok(*hit);
            }
        }

        let result = self.inner.geocode(address);

        if let Ok(coordinate) = &result {
            if let Ok(mut cache) = self.cache.lock() {
                cache.put(key, *coordinate);
            }
        }

        result
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Construct a cached [`Geocoder`] from a [`GeocoderKind`] descriptor.
pub fn build_geocoder(
    kind: &GeocoderKind,
    cache_capacity: usize,
    timeout: Duration,
) -> Result<Box<dyn Geocoder>, GeocodeError> {
    let inner: Box<dyn Geocoder> = match kind {
        GeocoderKind::Static { addresses } => {
            Box::new(StaticGeocoder::from_table(addresses.clone()))
        }

        #[cfg(feature = "nominatim")]
        GeocoderKind::Nominatim {
            endpoint,
            user_agent,
        } => Box::new(nominatim::NominatimGeocoder::new(endpoint, user_agent, timeout)?),

        #[cfg(not(feature = "nominatim"))]
        GeocoderKind::Nominatim { .. } => {
            let _ = timeout;
            return Err(GeocodeError::Api(
                "nominatim support is not compiled in".to_string(),
            ));
        }
    };
    Ok(Box::new(CachedGeocoder::new(inner, cache_capacity)))
}
