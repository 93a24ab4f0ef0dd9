//! Positioning platform port
//!
//! Mirrors the shape of an OS location service: a permission model, a
//! permission prompt that resolves later, and start/stop of a stream of
//! position updates. The single-shot fetch logic built on top of it lives
//! in [`PositionSignal`](crate::signals::PositionSignal).

use async_trait::async_trait;
use region_gate_domain::Coordinate;
use tokio::sync::mpsc;

/// Permission state for positioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// Positioning is blocked by policy (e.g. parental controls)
    Restricted,
    /// The user declined
    Denied,
    /// Allowed at all times
    AuthorizedAlways,
    /// Allowed while the app is in use
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedAlways | AuthorizationStatus::AuthorizedWhenInUse
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::NotDetermined => "not_determined",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::AuthorizedAlways => "authorized_always",
            AuthorizationStatus::AuthorizedWhenInUse => "authorized_when_in_use",
        }
    }
}

impl std::fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuthorizationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "not_determined" | "undetermined" => Ok(AuthorizationStatus::NotDetermined),
            "restricted" => Ok(AuthorizationStatus::Restricted),
            "denied" => Ok(AuthorizationStatus::Denied),
            "authorized" | "authorized_always" | "always" => {
                Ok(AuthorizationStatus::AuthorizedAlways)
            }
            "authorized_when_in_use" | "when_in_use" => {
                Ok(AuthorizationStatus::AuthorizedWhenInUse)
            }
            other => Err(format!(
                "Unknown authorization status: {}. Valid: authorized, when_in_use, denied, restricted, not_determined",
                other
            )),
        }
    }
}

/// One event from a running position update stream
#[derive(Debug, Clone, PartialEq)]
pub enum PositionUpdate {
    /// A position fix
    Fix(Coordinate),
    /// The platform failed to produce a fix
    Failed(String),
}

/// Handle for receiving position updates after `start_updates`
pub struct PositionUpdates {
    pub receiver: mpsc::Receiver<PositionUpdate>,
}

impl PositionUpdates {
    pub fn new(receiver: mpsc::Receiver<PositionUpdate>) -> Self {
        Self { receiver }
    }

    /// Wait for the next update; `None` when the platform closed the stream
    pub async fn next(&mut self) -> Option<PositionUpdate> {
        self.receiver.recv().await
    }
}

/// Platform positioning service
#[async_trait]
pub trait PositioningPlatform: Send + Sync {
    /// Whether positioning is enabled at the platform level
    fn services_enabled(&self) -> bool;

    /// Current permission state
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for permission; resolves once they decide
    async fn request_authorization(&self) -> AuthorizationStatus;

    /// Begin delivering position updates
    fn start_updates(&self) -> PositionUpdates;

    /// Stop delivering position updates
    fn stop_updates(&self);
}
