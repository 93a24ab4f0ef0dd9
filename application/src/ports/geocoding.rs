//! Reverse geocoding port

use super::signal::SignalError;
use async_trait::async_trait;
use region_gate_domain::Coordinate;

/// A place candidate returned by a reverse geocoder
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placemark {
    /// ISO 3166-1 alpha-2 country code, when the geocoder knows it
    pub iso_country_code: Option<String>,
    /// Human-readable name of the place
    pub name: Option<String>,
}

impl Placemark {
    pub fn in_country(code: impl Into<String>) -> Self {
        Self {
            iso_country_code: Some(code.into()),
            name: None,
        }
    }
}

/// Translates a coordinate into place candidates
///
/// Zero candidates is a valid answer; errors mean the lookup itself failed.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(&self, coordinate: &Coordinate)
    -> Result<Vec<Placemark>, SignalError>;
}
