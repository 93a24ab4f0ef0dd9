//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid {kind} code: {value:?}")]
    InvalidCode { kind: &'static str, value: String },

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Unknown check kind: {0}")]
    UnknownCheckKind(String),
}

impl DomainError {
    /// Check if this error came from parsing a check kind
    pub fn is_unknown_check(&self) -> bool {
        matches!(self, DomainError::UnknownCheckKind(_))
    }
}
