//! Signal value objects
//!
//! Codes and coordinates produced by the signal sources, and the
//! tri-state [`SignalResult`] each check resolves to.

pub mod codes;
pub mod coordinate;
pub mod result;

pub use codes::{CountryCode, LanguageCode};
pub use coordinate::Coordinate;
pub use result::SignalResult;
