//! Geocode signal
//!
//! Resolves a coordinate to a country using the first place candidate the
//! reverse geocoder returns. One round trip, no retries.

use crate::ports::geocoding::ReverseGeocoder;
use crate::ports::signal::SignalError;
use region_gate_domain::{Coordinate, CountryCode};
use std::sync::Arc;
use tracing::debug;

pub struct GeocodeSignal {
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl GeocodeSignal {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    /// Country of the first place candidate at `coordinate`
    pub async fn country_for(&self, coordinate: &Coordinate) -> Result<CountryCode, SignalError> {
        let placemarks = self.geocoder.reverse_geocode(coordinate).await?;
        debug!("Reverse geocoder returned {} candidate(s)", placemarks.len());

        let first = placemarks.into_iter().next().ok_or_else(|| {
            SignalError::Unavailable(format!("no place found at {}", coordinate))
        })?;
        let code = first.iso_country_code.ok_or_else(|| {
            SignalError::Unavailable(format!("no country code for place at {}", coordinate))
        })?;

        CountryCode::new(code).map_err(|e| SignalError::Unavailable(e.to_string()))
    }
}
