//! Signal services
//!
//! Single-shot signal acquisition built on top of the platform ports.
//! Locale and IP lookups are used directly through their ports; position
//! and geocoding need the extra control flow that lives here.

pub mod geocode;
pub mod position;

pub use geocode::GeocodeSignal;
pub use position::{DEFAULT_POSITION_TIMEOUT, PositionSignal};
