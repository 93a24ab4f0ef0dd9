//! IP geolocation adapters

mod ip_api;

pub use ip_api::{DEFAULT_IP_API_ENDPOINT, DEFAULT_IP_API_TIMEOUT, IpApiClient, IpLookupError};
