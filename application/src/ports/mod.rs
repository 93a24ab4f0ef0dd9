//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod geocoding;
pub mod ip_geolocation;
pub mod locale;
pub mod positioning;
pub mod progress;
pub mod signal;
