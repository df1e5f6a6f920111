//! Access to the identity backend's asynchronous session API.
//!
//! Every operation either starts a backend session (certificate choice,
//! signature) and yields its identifier, or reports the state of a session
//! started earlier.

use std::time::Duration;

use self::dto::{CertificateRequest, SessionResponse, SessionStatusResponse, SignatureRequest};
use self::error::TransportError;
use crate::model::signing_session::SessionId;

pub mod dto;
pub mod error;
pub mod factory;
pub mod http;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait SessionTransport: Send + Sync {
    /// Starts a certificate choice session for the person behind `semantics_identifier`
    async fn get_certificate(
        &self,
        semantics_identifier: &str,
        request: CertificateRequest,
    ) -> Result<SessionResponse, TransportError>;

    /// Fetches the state of a running session
    /// * `timeout_hint` - how long the backend may hold the request open waiting for completion
    async fn get_session_status(
        &self,
        session_id: &SessionId,
        timeout_hint: Duration,
    ) -> Result<SessionStatusResponse, TransportError>;

    /// Starts a signature session on the signing device identified by `document_number`
    async fn create_signature(
        &self,
        document_number: &str,
        request: SignatureRequest,
    ) -> Result<SessionResponse, TransportError>;
}
