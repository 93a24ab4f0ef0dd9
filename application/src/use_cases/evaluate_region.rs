//! Evaluate Region use case
//!
//! Decides whether the device is allowed by running every active check
//! concurrently and combining the results:
//!
//! ```text
//!            ┌── ByLanguage ── locale ───────────────────┐
//!  policy ───┼── ByRegion   ── locale ───────────────────┤
//!            ├── ByLocation ── position ─► geocode ──────┼──► AND ──► verdict
//!            └── ByIp       ── IP geolocation ───────────┘
//! ```
//!
//! Every selected check is awaited before combining; there is no early
//! exit on the first denial. Signal failures never surface as errors:
//! they become `Unknown` outcomes, which count as "not allowed".
//!
//! Evaluations on one instance are serialized. A second call made while
//! one is in flight waits for it to finish (FIFO). Cancellation is scoped
//! to one call: a cancelled evaluation leaves the instance usable.

use crate::ports::ip_geolocation::IpGeolocation;
use crate::ports::locale::LocaleProvider;
use crate::ports::progress::{CheckProgressNotifier, NoProgress};
use crate::signals::{GeocodeSignal, PositionSignal};
use crate::use_cases::shared::check_cancelled;
use region_gate_domain::{
    ActiveChecks, CheckKind, CheckOutcome, Coordinate, RegionPolicy, Verdict,
};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during an evaluation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluateRegionError {
    #[error("Evaluation cancelled")]
    Cancelled,
}

impl EvaluateRegionError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EvaluateRegionError::Cancelled)
    }
}

/// The signal sources an evaluation consults
#[derive(Clone)]
pub struct SignalSources {
    pub locale: Arc<dyn LocaleProvider>,
    pub position: Arc<PositionSignal>,
    pub geocode: Arc<GeocodeSignal>,
    pub ip: Arc<dyn IpGeolocation>,
}

/// Input for the EvaluateRegion use case
#[derive(Debug, Clone, Default)]
pub struct EvaluateRegionInput {
    /// Pre-fetched coordinate; skips the position signal for `ByLocation`
    pub coordinate: Option<Coordinate>,
    /// Replaces the stored policy before this evaluation
    pub policy: Option<RegionPolicy>,
    /// Cancels this evaluation only, including while it waits in the queue
    pub cancellation: Option<CancellationToken>,
}

impl EvaluateRegionInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_policy(mut self, policy: RegionPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Use case for evaluating whether the device is in an allowed region
pub struct EvaluateRegionUseCase {
    sources: SignalSources,
    policy: RwLock<RegionPolicy>,
    evaluation: Mutex<()>,
    is_allowed: watch::Sender<Option<bool>>,
}

impl EvaluateRegionUseCase {
    pub fn new(sources: SignalSources, policy: RegionPolicy) -> Self {
        let (is_allowed, _) = watch::channel(None);
        Self {
            sources,
            policy: RwLock::new(policy),
            evaluation: Mutex::new(()),
            is_allowed,
        }
    }

    /// Snapshot of the current policy
    pub fn policy(&self) -> RegionPolicy {
        self.policy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the policy used by subsequent evaluations
    pub fn set_policy(&self, policy: RegionPolicy) {
        *self.policy.write().unwrap_or_else(PoisonError::into_inner) = policy;
    }

    /// Mutate the policy in place
    pub fn update_policy(&self, update: impl FnOnce(&mut RegionPolicy)) {
        update(&mut self.policy.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Verdict of the last completed evaluation, if any
    ///
    /// Informational only; every evaluation queries the signals afresh.
    pub fn is_allowed(&self) -> Option<bool> {
        *self.is_allowed.borrow()
    }

    /// Watch the last verdict
    pub fn subscribe(&self) -> watch::Receiver<Option<bool>> {
        self.is_allowed.subscribe()
    }

    /// Evaluate and return only the verdict boolean
    ///
    /// A cancelled evaluation yields `false`.
    pub async fn evaluate(&self, coordinate: Option<Coordinate>) -> bool {
        let input = EvaluateRegionInput {
            coordinate,
            ..Default::default()
        };
        match self.execute(input).await {
            Ok(verdict) => verdict.allowed,
            Err(e) => {
                warn!("{}; reporting not allowed", e);
                false
            }
        }
    }

    /// Evaluate in the background and hand the verdict to `completion`
    ///
    /// Must be called from within a Tokio runtime. `completion` runs on the
    /// evaluation task after the observable verdict is written and before
    /// the next queued evaluation starts, so completions never interleave.
    pub fn evaluate_with_callback<F>(
        self: &Arc<Self>,
        input: EvaluateRegionInput,
        completion: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let _ = this.run_serialized(input, &NoProgress, completion).await;
        })
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: EvaluateRegionInput) -> Result<Verdict, EvaluateRegionError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: EvaluateRegionInput,
        progress: &dyn CheckProgressNotifier,
    ) -> Result<Verdict, EvaluateRegionError> {
        self.run_serialized(input, progress, |_| {}).await
    }

    async fn run_serialized<F>(
        &self,
        input: EvaluateRegionInput,
        progress: &dyn CheckProgressNotifier,
        completion: F,
    ) -> Result<Verdict, EvaluateRegionError>
    where
        F: FnOnce(bool),
    {
        let Some(_evaluation) = self.lock_evaluation(input.cancellation.as_ref()).await else {
            warn!("Evaluation cancelled while queued");
            completion(false);
            return Err(EvaluateRegionError::Cancelled);
        };
        let result = self.run(input, progress).await;
        completion(result.as_ref().is_ok_and(|v| v.allowed));
        result
    }

    /// Wait for our turn; `None` if the caller's token fires first
    async fn lock_evaluation(
        &self,
        token: Option<&CancellationToken>,
    ) -> Option<MutexGuard<'_, ()>> {
        match token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => None,
                guard = self.evaluation.lock() => Some(guard),
            },
            None => Some(self.evaluation.lock().await),
        }
    }

    async fn run(
        &self,
        input: EvaluateRegionInput,
        progress: &dyn CheckProgressNotifier,
    ) -> Result<Verdict, EvaluateRegionError> {
        check_cancelled(&input.cancellation)?;

        if let Some(policy) = input.policy {
            self.set_policy(policy);
        }
        let policy = Arc::new(self.policy());
        let active = policy.active_checks();

        if active.defaulted {
            info!(
                "No checks configured, running all {} checks",
                active.kinds.len()
            );
        }
        info!(
            "Evaluating region with checks: {}",
            active
                .kinds
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        progress.on_evaluation_start(&active.kinds);

        let mut join_set = JoinSet::new();
        for kind in active.kinds.iter().copied() {
            let sources = self.sources.clone();
            let policy = Arc::clone(&policy);
            let coordinate = input.coordinate;

            join_set.spawn(async move { run_check(&sources, &policy, kind, coordinate).await });
        }

        let outcomes = collect_outcomes(join_set, &active, input.cancellation.as_ref(), progress)
            .await
            .inspect_err(|_| progress.on_evaluation_cancelled())?;
        let mut verdict = Verdict::from_outcomes(outcomes, active.defaulted);
        if policy.force_blocked {
            info!("Policy forces a block; overriding the combined checks");
            verdict = verdict.force_block();
        }

        self.is_allowed.send_replace(Some(verdict.allowed));
        info!(
            "Region verdict: {} {}",
            if verdict.allowed { "allowed" } else { "not allowed" },
            verdict.summary()
        );
        progress.on_evaluation_complete(&verdict);

        Ok(verdict)
    }
}

/// Wait for every check task; a task that dies contributes `Unknown`
async fn collect_outcomes(
    mut join_set: JoinSet<CheckOutcome>,
    active: &ActiveChecks,
    token: Option<&CancellationToken>,
    progress: &dyn CheckProgressNotifier,
) -> Result<Vec<CheckOutcome>, EvaluateRegionError> {
    let mut outcomes = Vec::with_capacity(active.kinds.len());

    loop {
        let next = if let Some(token) = token {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    warn!("Evaluation cancelled with {} check(s) pending", join_set.len());
                    join_set.abort_all();
                    return Err(EvaluateRegionError::Cancelled);
                }
                next = join_set.join_next() => next,
            }
        } else {
            join_set.join_next().await
        };

        match next {
            Some(Ok(outcome)) => {
                debug!("Check {} resolved: {}", outcome.kind, outcome.result);
                progress.on_check_complete(&outcome);
                outcomes.push(outcome);
            }
            Some(Err(e)) => {
                warn!("Check task join error: {}", e);
            }
            None => break,
        }
    }

    for kind in &active.kinds {
        if !outcomes.iter().any(|o| o.kind == *kind) {
            let outcome = CheckOutcome::unknown(*kind, "check task failed");
            progress.on_check_complete(&outcome);
            outcomes.push(outcome);
        }
    }

    Ok(outcomes)
}

async fn run_check(
    sources: &SignalSources,
    policy: &RegionPolicy,
    kind: CheckKind,
    coordinate: Option<Coordinate>,
) -> CheckOutcome {
    match kind {
        CheckKind::ByLanguage => match sources.locale.current_language() {
            Some(language) => CheckOutcome::compared(
                kind,
                language.as_str(),
                policy.allows_language(language.as_str()),
            ),
            None => CheckOutcome::missing(kind, "device language unavailable"),
        },
        CheckKind::ByRegion => match sources.locale.current_region() {
            Some(region) => CheckOutcome::compared(
                kind,
                region.as_str(),
                policy.allows_region(region.as_str()),
            ),
            None => CheckOutcome::missing(kind, "device region unavailable"),
        },
        CheckKind::ByLocation => {
            let coordinate = match coordinate {
                Some(coordinate) => {
                    debug!("Using caller-supplied coordinate {}", coordinate);
                    coordinate
                }
                None => match sources.position.fetch_position().await {
                    Ok(coordinate) => coordinate,
                    Err(e) => {
                        warn!("Location check degraded: {}", e);
                        return CheckOutcome::unknown(kind, e.to_string());
                    }
                },
            };

            match sources.geocode.country_for(&coordinate).await {
                Ok(country) => CheckOutcome::compared(
                    kind,
                    country.as_str(),
                    policy.allows_region(country.as_str()),
                ),
                Err(e) => {
                    warn!("Location check degraded: {}", e);
                    CheckOutcome::unknown(kind, e.to_string())
                }
            }
        }
        CheckKind::ByIp => match sources.ip.lookup_country().await {
            Ok(country) => CheckOutcome::compared(
                kind,
                country.as_str(),
                policy.allows_region(country.as_str()),
            ),
            Err(e) => {
                warn!("IP check degraded: {}", e);
                CheckOutcome::unknown(kind, e.to_string())
            }
        },
    }
}
