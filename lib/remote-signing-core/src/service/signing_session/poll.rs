use std::future::Future;

use tokio::time::Instant;

use super::SigningSessionService;
use super::error::SigningSessionError;
use super::state::SessionState;
use crate::provider::session_transport::SessionTransport;
use crate::provider::session_transport::dto::{
    EndResult, SessionResponse, SessionResult, SessionStatusResponse,
};
use crate::provider::session_transport::error::{TransportError, TransportOperation};

impl SigningSessionService {
    /// Starts a backend session and polls it until it completes.
    ///
    /// Returns the result of a session that ended with `OK`. Every status
    /// poll accounts one `poll_interval` against `session_timeout`, so at
    /// most `session_timeout / poll_interval` polls are made.
    pub(super) async fn poll_until_complete<F, Fut>(
        &self,
        transport: &dyn SessionTransport,
        operation: TransportOperation,
        device_selection: bool,
        initial_request: F,
    ) -> Result<SessionResult, SigningSessionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SessionResponse, TransportError>>,
    {
        self.check_cancelled()?;
        let session_id = initial_request()
            .await?
            .session_id
            .ok_or(SigningSessionError::MissingSessionId(operation))?;

        tracing::debug!(%operation, "Backend session started");

        let mut waited = std::time::Duration::ZERO;
        while waited < self.config.session_timeout {
            let poll_started = Instant::now();

            self.check_cancelled()?;
            let status = transport
                .get_session_status(&session_id, self.config.status_poll_timeout_hint)
                .await?;

            match status {
                SessionStatusResponse::Complete(result) => {
                    return match result.end_result {
                        EndResult::Ok => Ok(result),
                        end_result => Err(SigningSessionError::EndResult(end_result)),
                    };
                }
                SessionStatusResponse::Running if device_selection => {
                    self.publish(SessionState::selecting_device());
                }
                SessionStatusResponse::Running => {}
            }

            waited += self.config.poll_interval;
            if waited < self.config.session_timeout {
                self.sleep_until(poll_started + self.config.poll_interval).await?;
            }
        }

        Err(SigningSessionError::Timeout(self.config.session_timeout))
    }
}
