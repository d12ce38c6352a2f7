use std::time::Duration;

use reqwest::{blocking::Client, Url};
use serde::Deserialize;

use super::{GeocodeError, Geocoder};
use crate::spatial::Coordinate;

/// Geocodes through a Nominatim `/search` endpoint.
///
/// Nominatim's usage policy requires an identifying User-Agent, so one must be
/// supplied.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Deserialize)]
pub(crate) struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|err| GeocodeError::Http(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, address: &str) -> Result<Url, GeocodeError> {
        let mut url = Url::parse(&format!("{}/search", self.endpoint))
            .map_err(|err| GeocodeError::Api(format!("failed to build Nominatim URL: {}", err)))?;
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        Ok(url)
    }
}

pub(crate) fn parse_search_response(
    address: &str,
    places: Vec<NominatimPlace>,
) -> Result<Coordinate, GeocodeError> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;

    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| GeocodeError::Api(format!("bad latitude '{}'", place.lat)))?;
    let lon: f64 = place
        .lon
        .parse()
        .map_err(|_| GeocodeError::Api(format!("bad longitude '{}'", place.lon)))?;

    Coordinate::new(lat, lon).map_err(|err| GeocodeError::Api(err.to_string()))
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let url = self.search_url(address)?;
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| GeocodeError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Api(format!("HTTP {}", status.as_u16())));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .map_err(|err| GeocodeError::Api(err.to_string()))?;
        parse_search_response(address, places)
    }
}
