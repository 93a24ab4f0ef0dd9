//! Reverse geocoding adapters

mod nominatim;

pub use nominatim::{
    DEFAULT_NOMINATIM_ENDPOINT, DEFAULT_NOMINATIM_TIMEOUT, GeocodeError, NominatimGeocoder,
};
