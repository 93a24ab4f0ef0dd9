//! Infrastructure layer for region-gate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod geocoding;
pub mod ip;
pub mod locale;
pub mod positioning;

#[cfg(test)]
mod test_http;

// Re-export commonly used types
pub use config::{
    ConfigLoadError, ConfigLoader, FileConfig, FileGeocodingConfig, FileLocaleConfig,
    FileNetworkConfig, FileOutputConfig, FilePolicyConfig, FilePositionConfig,
};
pub use geocoding::{GeocodeError, NominatimGeocoder};
pub use ip::{IpApiClient, IpLookupError};
pub use locale::{StaticLocale, SystemLocale};
pub use positioning::ConfiguredPositioning;
