//! Position signal
//!
//! Turns a [`PositioningPlatform`] into a single-shot "give me one fix"
//! operation:
//!
//! | Platform state            | Result                          |
//! |---------------------------|---------------------------------|
//! | services disabled         | `ServicesDisabled` immediately  |
//! | permission not determined | prompt, then re-check           |
//! | denied / restricted       | `PermissionDenied`              |
//! | authorized                | first update, then stop updates |
//!
//! Every fetch is bounded by a timeout. Only one fetch may be in flight
//! per instance; an overlapping call is rejected with `Busy` instead of
//! replacing the pending one.

use crate::ports::positioning::{AuthorizationStatus, PositionUpdate, PositioningPlatform};
use crate::ports::signal::SignalError;
use region_gate_domain::Coordinate;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Default upper bound for permission prompt plus first fix
pub const DEFAULT_POSITION_TIMEOUT: Duration = Duration::from_secs(30);

/// Single-shot position acquisition over a positioning platform
pub struct PositionSignal {
    platform: Arc<dyn PositioningPlatform>,
    timeout: Duration,
    in_flight: Mutex<()>,
}

impl PositionSignal {
    pub fn new(platform: Arc<dyn PositioningPlatform>) -> Self {
        Self {
            platform,
            timeout: DEFAULT_POSITION_TIMEOUT,
            in_flight: Mutex::new(()),
        }
    }

    /// Set the timeout covering the permission prompt and the first fix
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a fetch is currently in flight
    pub fn is_fetching(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Fetch one position fix
    pub async fn fetch_position(&self) -> Result<Coordinate, SignalError> {
        let _in_flight = self.in_flight.try_lock().map_err(|_| {
            warn!("Rejecting overlapping position fetch");
            SignalError::Busy
        })?;

        if !self.platform.services_enabled() {
            debug!("Positioning services are disabled");
            return Err(SignalError::ServicesDisabled);
        }

        match tokio::time::timeout(self.timeout, self.acquire()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("No position within {:?}", self.timeout);
                Err(SignalError::Timeout(self.timeout))
            }
        }
    }

    async fn acquire(&self) -> Result<Coordinate, SignalError> {
        let mut status = self.platform.authorization_status();
        if status == AuthorizationStatus::NotDetermined {
            debug!("Positioning permission not determined, prompting");
            status = self.platform.request_authorization().await;
        }

        if !status.is_authorized() {
            debug!("Positioning not authorized: {}", status);
            return Err(SignalError::PermissionDenied);
        }

        let mut updates = self.platform.start_updates();
        let _stop = StopUpdatesOnDrop(self.platform.as_ref());

        match updates.next().await {
            Some(PositionUpdate::Fix(coordinate)) => {
                debug!("Position fix: {}", coordinate);
                Ok(coordinate)
            }
            Some(PositionUpdate::Failed(reason)) => {
                warn!("Positioning failed: {}", reason);
                Err(SignalError::Unavailable(reason))
            }
            None => Err(SignalError::Unavailable(
                "position updates ended without a fix".to_string(),
            )),
        }
    }
}

/// Stops platform updates when the fetch finishes, times out or is cancelled
struct StopUpdatesOnDrop<'a>(&'a dyn PositioningPlatform);

impl Drop for StopUpdatesOnDrop<'_> {
    fn drop(&mut self) {
        self.0.stop_updates();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::positioning::PositionUpdates;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    // ==================== Test Mocks ====================

    struct MockPlatform {
        enabled: bool,
        status: AuthorizationStatus,
        prompt_answer: AuthorizationStatus,
        prompt_delay: Duration,
        updates: Vec<PositionUpdate>,
        /// Keep the stream open after the scripted updates
        hang: bool,
        held_sender: std::sync::Mutex<Option<mpsc::Sender<PositionUpdate>>>,
        prompts: AtomicUsize,
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    impl MockPlatform {
        fn authorized(updates: Vec<PositionUpdate>) -> Self {
            Self {
                enabled: true,
                status: AuthorizationStatus::AuthorizedWhenInUse,
                prompt_answer: AuthorizationStatus::Denied,
                prompt_delay: Duration::ZERO,
                updates,
                hang: false,
                held_sender: std::sync::Mutex::new(None),
                prompts: AtomicUsize::new(0),
                starts: AtomicUsize::new(0),
                stops: AtomicUsize::new(0),
            }
        }

        fn with_status(mut self, status: AuthorizationStatus) -> Self {
            self.status = status;
            self
        }

        fn with_prompt(mut self, answer: AuthorizationStatus, delay: Duration) -> Self {
            self.prompt_answer = answer;
            self.prompt_delay = delay;
            self
        }

        fn disabled(mut self) -> Self {
            self.enabled = false;
            self
        }

        fn hanging(mut self) -> Self {
            self.hang = true;
            self
        }
    }

    #[async_trait]
    impl PositioningPlatform for MockPlatform {
        fn services_enabled(&self) -> bool {
            self.enabled
        }

        fn authorization_status(&self) -> AuthorizationStatus {
            self.status
        }

        async fn request_authorization(&self) -> AuthorizationStatus {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.prompt_delay).await;
            self.prompt_answer
        }

        fn start_updates(&self) -> PositionUpdates {
            self.starts.fetch_add(1, Ordering::SeqCst);
            let (tx, rx) = mpsc::channel(8);
            for update in &self.updates {
                tx.try_send(update.clone()).unwrap();
            }
            if self.hang {
                *self.held_sender.lock().unwrap() = Some(tx);
            }
            PositionUpdates::new(rx)
        }

        fn stop_updates(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn moscow() -> Coordinate {
        Coordinate::new(55.7558, 37.6173).unwrap()
    }

    fn minsk() -> Coordinate {
        Coordinate::new(53.9006, 27.5590).unwrap()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_disabled_services_resolve_immediately() {
        let platform = Arc::new(MockPlatform::authorized(vec![]).disabled());
        let signal = PositionSignal::new(platform.clone());

        assert_eq!(signal.fetch_position().await, Err(SignalError::ServicesDisabled));
        assert_eq!(platform.starts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_authorized_returns_first_fix_and_stops() {
        let platform = Arc::new(MockPlatform::authorized(vec![
            PositionUpdate::Fix(moscow()),
            PositionUpdate::Fix(minsk()),
        ]));
        let signal = PositionSignal::new(platform.clone());

        assert_eq!(signal.fetch_position().await, Ok(moscow()));
        assert_eq!(platform.starts.load(Ordering::SeqCst), 1);
        assert_eq!(platform.stops.load(Ordering::SeqCst), 1);
        assert!(!signal.is_fetching());
    }

    #[tokio::test]
    async fn test_denied_does_not_prompt() {
        let platform = Arc::new(
            MockPlatform::authorized(vec![PositionUpdate::Fix(moscow())])
                .with_status(AuthorizationStatus::Denied),
        );
        let signal = PositionSignal::new(platform.clone());

        assert_eq!(signal.fetch_position().await, Err(SignalError::PermissionDenied));
        assert_eq!(platform.prompts.load(Ordering::SeqCst), 0);
        assert_eq!(platform.starts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_restricted_is_denied() {
        let platform = Arc::new(
            MockPlatform::authorized(vec![]).with_status(AuthorizationStatus::Restricted),
        );
        let signal = PositionSignal::new(platform);

        assert_eq!(signal.fetch_position().await, Err(SignalError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_prompt_granted_waits_for_decision() {
        let platform = Arc::new(
            MockPlatform::authorized(vec![PositionUpdate::Fix(minsk())])
                .with_status(AuthorizationStatus::NotDetermined)
                .with_prompt(AuthorizationStatus::AuthorizedWhenInUse, Duration::from_millis(30)),
        );
        let signal = PositionSignal::new(platform.clone());

        assert_eq!(signal.fetch_position().await, Ok(minsk()));
        assert_eq!(platform.prompts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_prompt_declined() {
        let platform = Arc::new(
            MockPlatform::authorized(vec![PositionUpdate::Fix(minsk())])
                .with_status(AuthorizationStatus::NotDetermined)
                .with_prompt(AuthorizationStatus::Denied, Duration::ZERO),
        );
        let signal = PositionSignal::new(platform.clone());

        assert_eq!(signal.fetch_position().await, Err(SignalError::PermissionDenied));
        assert_eq!(platform.starts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_platform_failure_is_unavailable() {
        let platform = Arc::new(MockPlatform::authorized(vec![PositionUpdate::Failed(
            "kCLErrorLocationUnknown".to_string(),
        )]));
        let signal = PositionSignal::new(platform.clone());

        assert_eq!(
            signal.fetch_position().await,
            Err(SignalError::Unavailable("kCLErrorLocationUnknown".to_string()))
        );
        assert_eq!(platform.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_closed_stream_is_unavailable() {
        let platform = Arc::new(MockPlatform::authorized(vec![]));
        let signal = PositionSignal::new(platform);

        let result = signal.fetch_position().await;
        assert!(matches!(result, Err(SignalError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_no_fix_times_out_and_stops_updates() {
        let platform = Arc::new(MockPlatform::authorized(vec![]).hanging());
        let signal =
            PositionSignal::new(platform.clone()).with_timeout(Duration::from_millis(50));

        assert_eq!(
            signal.fetch_position().await,
            Err(SignalError::Timeout(Duration::from_millis(50)))
        );
        assert_eq!(platform.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unanswered_prompt_times_out() {
        let platform = Arc::new(
            MockPlatform::authorized(vec![])
                .with_status(AuthorizationStatus::NotDetermined)
                .with_prompt(AuthorizationStatus::AuthorizedAlways, Duration::from_secs(60)),
        );
        let signal = PositionSignal::new(platform).with_timeout(Duration::from_millis(50));

        assert!(matches!(
            signal.fetch_position().await,
            Err(SignalError::Timeout(_))
        ));
    }

    /// Overlapping fetches on one instance are rejected, not silently merged.
    #[tokio::test]
    async fn test_overlapping_fetch_is_rejected() {
        let platform = Arc::new(MockPlatform::authorized(vec![]).hanging());
        let signal =
            Arc::new(PositionSignal::new(platform).with_timeout(Duration::from_millis(200)));

        let first = {
            let signal = Arc::clone(&signal);
            tokio::spawn(async move { signal.fetch_position().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(signal.is_fetching());
        assert_eq!(signal.fetch_position().await, Err(SignalError::Busy));

        let first = first.await.unwrap();
        assert!(matches!(first, Err(SignalError::Timeout(_))));
        assert!(!signal.is_fetching());
    }
}
