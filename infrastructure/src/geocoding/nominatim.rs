//! Nominatim (OpenStreetMap) reverse geocoder
//!
//! `GET <endpoint>?format=jsonv2&lat=..&lon=..&zoom=3`. Zoom level 3 asks
//! for country granularity. A `{"error": ...}` body means "nothing here"
//! (open sea, poles) and yields zero placemarks rather than an error.

use async_trait::async_trait;
use region_gate_application::{Placemark, ReverseGeocoder, SignalError};
use region_gate_domain::Coordinate;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Public Nominatim reverse endpoint
pub const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

/// Default request timeout
pub const DEFAULT_NOMINATIM_TIMEOUT: Duration = Duration::from_secs(30);

// Nominatim's usage policy requires an identifying User-Agent
const USER_AGENT: &str = concat!(
    "region-gate/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/music-brain88/region-gate)"
);

/// Errors from a reverse geocoding request
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<GeocodeError> for SignalError {
    fn from(e: GeocodeError) -> Self {
        SignalError::LookupFailed(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

impl ReverseResponse {
    fn into_placemarks(self) -> Vec<Placemark> {
        if let Some(error) = self.error {
            debug!("Nominatim found nothing: {}", error);
            return Vec::new();
        }

        let (country, code) = match self.address {
            Some(address) => (address.country, address.country_code),
            None => (None, None),
        };

        vec![Placemark {
            iso_country_code: code.map(|c| c.to_uppercase()),
            name: self.display_name.or(country),
        }]
    }
}

pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Geocoder for the public endpoint with the default timeout
    pub fn new() -> Result<Self, GeocodeError> {
        Self::with_endpoint(DEFAULT_NOMINATIM_ENDPOINT, DEFAULT_NOMINATIM_TIMEOUT)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Reverse geocode, keeping the detailed error
    pub async fn lookup(&self, coordinate: &Coordinate) -> Result<Vec<Placemark>, GeocodeError> {
        debug!("Reverse geocoding {} via {}", coordinate, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("zoom", "3".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: ReverseResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_placemarks())
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<Placemark>, SignalError> {
        Ok(self.lookup(coordinate).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::{CannedResponse, serve};

    fn geocoder(url: &str) -> NominatimGeocoder {
        NominatimGeocoder::with_endpoint(format!("{}/reverse", url), Duration::from_secs(5)).unwrap()
    }

    fn moscow() -> Coordinate {
        Coordinate::new(55.75, 37.62).unwrap()
    }

    #[tokio::test]
    async fn test_country_code_is_uppercased() {
        let server = serve(CannedResponse::ok(
            r#"{"display_name":"Россия","address":{"country":"Россия","country_code":"ru"}}"#,
        ))
        .await;

        let placemarks = geocoder(&server.url).lookup(&moscow()).await.unwrap();
        assert_eq!(placemarks.len(), 1);
        assert_eq!(placemarks[0].iso_country_code.as_deref(), Some("RU"));
        assert_eq!(placemarks[0].name.as_deref(), Some("Россия"));
    }

    #[tokio::test]
    async fn test_query_parameters() {
        let server = serve(CannedResponse::ok(r#"{"address":{"country_code":"ru"}}"#)).await;

        geocoder(&server.url).lookup(&moscow()).await.unwrap();
        let line = server.first_request_line().unwrap();
        assert!(line.starts_with("GET /reverse?format=jsonv2&lat=55.75&lon=37.62&zoom=3 "));
    }

    #[tokio::test]
    async fn test_error_body_is_no_placemarks() {
        let server = serve(CannedResponse::ok(r#"{"error":"Unable to geocode"}"#)).await;

        let placemarks = geocoder(&server.url).lookup(&moscow()).await.unwrap();
        assert!(placemarks.is_empty());
    }

    #[tokio::test]
    async fn test_missing_address_gives_codeless_placemark() {
        let server = serve(CannedResponse::ok(r#"{"display_name":"Somewhere"}"#)).await;

        let placemarks = geocoder(&server.url).lookup(&moscow()).await.unwrap();
        assert_eq!(placemarks[0].iso_country_code, None);
    }

    #[tokio::test]
    async fn test_http_error_maps_to_lookup_failed() {
        let server = serve(CannedResponse::status(503, "{}")).await;

        let err = geocoder(&server.url)
            .reverse_geocode(&moscow())
            .await
            .unwrap_err();
        assert_eq!(err, SignalError::LookupFailed("HTTP error: 503".to_string()));
    }

    #[test]
    fn test_default_endpoint() {
        let geocoder = NominatimGeocoder::new().unwrap();
        assert_eq!(geocoder.endpoint(), DEFAULT_NOMINATIM_ENDPOINT);
    }
}
