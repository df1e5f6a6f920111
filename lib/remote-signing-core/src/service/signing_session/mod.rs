//! Remote signing run: certificate choice, hash preparation, verification
//! code display, signature and finalization against the identity backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use self::error::SigningSessionError;
use self::state::SessionState;
use crate::config::ConfigValidationError;
use crate::config::core_config::SigningConfig;
use crate::provider::session_transport::factory::SessionTransportFactory;
use crate::provider::task_visibility::TaskVisibility;

pub mod dto;
pub mod error;
pub mod fault;
mod poll;
pub mod service;
pub mod state;
pub mod verification_code;


/// Long-lived orchestrator of signing runs.
///
/// Holds the observable [`SessionState`] of the latest run. Only one run is
/// active at a time.
pub struct SigningSessionService {
    config: SigningConfig,
    transport_factory: Arc<dyn SessionTransportFactory>,
    task_visibility: Arc<dyn TaskVisibility>,
    state: watch::Sender<SessionState>,
    cancellation_token: Mutex<CancellationToken>,
    running: AtomicBool,
}

impl SigningSessionService {
    /// Fails when `config` would let the poll loop run unbounded.
    pub fn new(
        config: SigningConfig,
        transport_factory: Arc<dyn SessionTransportFactory>,
        task_visibility: Arc<dyn TaskVisibility>,
    ) -> Result<Self, ConfigValidationError> {
        config.validate()?;

        Ok(Self {
            config,
            transport_factory,
            task_visibility,
            state: watch::Sender::new(SessionState::default()),
            cancellation_token: Mutex::new(CancellationToken::new()),
            running: AtomicBool::new(false),
        })
    }

    /// Requests cooperative cancellation of the current run.
    ///
    /// Checked before every backend call and wakes the run from any wait
    /// between calls; a call already in flight is not interrupted. Clearing
    /// the flag arms a fresh token for the next run.
    pub fn set_cancelled(&self, cancelled: bool) {
        let mut token = self
            .cancellation_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if cancelled {
            token.cancel();
        } else if token.is_cancelled() {
            *token = CancellationToken::new();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token().is_cancelled()
    }

    /// Clears the published state. The cancellation flag is left as is.
    pub fn reset_values(&self) {
        self.state.send_replace(SessionState::default());
    }

    /// Snapshot of the latest published state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn publish(&self, state: SessionState) {
        self.state.send_replace(state);
    }

    fn publish_failure(&self, error: &SigningSessionError) {
        let status = error.status();
        tracing::warn!(?status, "Signing session failed: {error}");
        self.publish(SessionState::failed(status, error.message()));
    }

    fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check_cancelled(&self) -> Result<(), SigningSessionError> {
        if self.is_cancelled() {
            return Err(SigningSessionError::Cancelled);
        }
        Ok(())
    }

    /// Waits until `deadline` unless the run is cancelled first.
    async fn sleep_until(&self, deadline: Instant) -> Result<(), SigningSessionError> {
        let cancellation_token = self.cancellation_token();

        tokio::select! {
            _ = cancellation_token.cancelled() => Err(SigningSessionError::Cancelled),
            _ = tokio::time::sleep_until(deadline) => Ok(()),
        }
    }

    fn begin_run(&self) -> Option<RunGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard(&self.running))
    }
}

/// Marks a run as active until dropped.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
