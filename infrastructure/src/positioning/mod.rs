//! Configured positioning platform
//!
//! A [`PositioningPlatform`] for hosts without positioning hardware. The
//! service state, the permission state, the answer to a permission prompt
//! and the reported fix all come from configuration.

use async_trait::async_trait;
use region_gate_application::{
    AuthorizationStatus, PositionUpdate, PositionUpdates, PositioningPlatform,
};
use region_gate_domain::Coordinate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::debug;

pub struct ConfiguredPositioning {
    enabled: bool,
    authorization: Mutex<AuthorizationStatus>,
    prompt_response: AuthorizationStatus,
    fix: Option<Coordinate>,
    updating: AtomicBool,
}

impl ConfiguredPositioning {
    pub fn new(
        enabled: bool,
        authorization: AuthorizationStatus,
        prompt_response: AuthorizationStatus,
        fix: Option<Coordinate>,
    ) -> Self {
        Self {
            enabled,
            authorization: Mutex::new(authorization),
            prompt_response,
            fix,
            updating: AtomicBool::new(false),
        }
    }

    /// Services disabled; every fetch resolves to "unavailable"
    pub fn disabled() -> Self {
        Self::new(
            false,
            AuthorizationStatus::NotDetermined,
            AuthorizationStatus::Denied,
            None,
        )
    }

    /// Whether updates are currently running
    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositioningPlatform for ConfiguredPositioning {
    fn services_enabled(&self) -> bool {
        self.enabled
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        *self
            .authorization
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn request_authorization(&self) -> AuthorizationStatus {
        let mut status = self
            .authorization
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *status == AuthorizationStatus::NotDetermined {
            debug!("Answering permission prompt with {}", self.prompt_response);
            *status = self.prompt_response;
        }
        *status
    }

    fn start_updates(&self) -> PositionUpdates {
        self.updating.store(true, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(1);
        let update = match self.fix {
            Some(coordinate) => PositionUpdate::Fix(coordinate),
            None => PositionUpdate::Failed("no position configured".to_string()),
        };
        // Capacity is 1 and this is the only send, so it cannot fail
        let _ = tx.try_send(update);
        PositionUpdates::new(rx)
    }

    fn stop_updates(&self) {
        self.updating.store(false, Ordering::SeqCst);
    }
}
