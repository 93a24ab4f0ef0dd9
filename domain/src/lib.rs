//! Domain layer for region-gate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Checks
//!
//! A region evaluation consults independent signals, each selected by a
//! [`CheckKind`]: device language, device region, positioning fix and IP
//! geolocation. [`RegionPolicy`] selects the active checks and holds the
//! allow-lists.
//!
//! ## Verdict
//!
//! Every selected check resolves to a [`SignalResult`]. The [`Verdict`] is
//! the logical AND of those results, with `Unknown` counted as "not
//! allowed" (fail closed).

pub mod check;
pub mod config;
pub mod core;
pub mod signal;
pub mod verdict;

// Re-export commonly used types
pub use check::{ActiveChecks, CheckKind, RegionPolicy};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use signal::{Coordinate, CountryCode, LanguageCode, SignalResult};
pub use verdict::{CheckOutcome, Verdict};
