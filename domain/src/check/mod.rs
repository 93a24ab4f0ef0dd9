//! Check selection domain
//!
//! A region evaluation runs a caller-selected set of independent checks.
//! [`CheckKind`] names a check, [`RegionPolicy`] holds the active set and
//! the allow-lists each check compares against.
//!
//! ```text
//!   ByLanguage ── locale language ──► allowed_languages
//!   ByRegion   ── locale region   ──► allowed_regions
//!   ByLocation ── position → geocode ► allowed_regions
//!   ByIp       ── IP geolocation  ──► allowed_regions
//! ```

pub mod kind;
pub mod policy;

pub use kind::CheckKind;
pub use policy::{ActiveChecks, DEFAULT_ALLOWED_LANGUAGES, DEFAULT_ALLOWED_REGIONS, RegionPolicy};
