//! IP geolocation port

use super::signal::SignalError;
use async_trait::async_trait;
use region_gate_domain::CountryCode;

/// Looks up the country of the caller's public IP address
///
/// One request per call. Implementations do not retry or cache.
#[async_trait]
pub trait IpGeolocation: Send + Sync {
    async fn lookup_country(&self) -> Result<CountryCode, SignalError>;
}
