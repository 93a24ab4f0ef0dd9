//! Application layer for region-gate
//!
//! This crate contains the signal ports, the signal services built on top
//! of them and the evaluation use case. It depends only on the domain layer.

pub mod ports;
pub mod signals;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    geocoding::{Placemark, ReverseGeocoder},
    ip_geolocation::IpGeolocation,
    locale::LocaleProvider,
    positioning::{AuthorizationStatus, PositionUpdate, PositionUpdates, PositioningPlatform},
    progress::{CheckProgressNotifier, NoProgress},
    signal::SignalError,
};
pub use signals::{DEFAULT_POSITION_TIMEOUT, GeocodeSignal, PositionSignal};
pub use use_cases::evaluate_region::{
    EvaluateRegionError, EvaluateRegionInput, EvaluateRegionUseCase, SignalSources,
};
