use std::time::Duration;

use thiserror::Error;

use super::fault::{classify_end_result, classify_message, classify_transport_error};
use crate::model::process_status::ProcessStatus;
use crate::provider::session_transport::dto::EndResult;
use crate::provider::session_transport::error::{
    TransportError, TransportFactoryError, TransportOperation,
};

#[derive(Debug, Error)]
pub enum SigningSessionError {
    #[error("A signing session is already running")]
    AlreadyRunning,
    #[error("Signing request is missing")]
    MissingRequest,
    #[error("Signing session was cancelled")]
    Cancelled,

    #[error("Session transport setup failed: {0}")]
    TransportSetup(#[from] TransportFactoryError),
    #[error("Relying party UUID `{0}` is not a valid UUID")]
    InvalidRelyingPartyUuid(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("No session identifier in {0} response")]
    MissingSessionId(TransportOperation),
    #[error("Session ended with result {0}")]
    EndResult(EndResult),
    #[error("Session did not complete within {0:?}")]
    Timeout(Duration),

    #[error("Document returned an empty hash")]
    EmptyHash,
    #[error("Invalid session payload: {0}")]
    InvalidPayload(String),
    #[error("Document error: {0:#}")]
    Document(anyhow::Error),
}

impl SigningSessionError {
    /// Terminal status published for this error.
    ///
    /// `None` for local preconditions and cancellation, which are reported
    /// through `error_state` alone.
    pub fn status(&self) -> Option<ProcessStatus> {
        match self {
            Self::AlreadyRunning | Self::MissingRequest | Self::Cancelled | Self::EmptyHash => None,
            Self::TransportSetup(_) => Some(ProcessStatus::InvalidSslHandshake),
            Self::InvalidRelyingPartyUuid(_) => Some(ProcessStatus::InvalidAccessRights),
            Self::Transport(error) => Some(classify_transport_error(error)),
            Self::MissingSessionId(_) => Some(ProcessStatus::MissingSessionId),
            Self::EndResult(end_result) => Some(classify_end_result(end_result)),
            Self::Timeout(_) => Some(ProcessStatus::Timeout),
            Self::InvalidPayload(_) => Some(ProcessStatus::GeneralError),
            Self::Document(error) => Some(classify_message(&format!("{error:#}"))),
        }
    }

    /// Human-readable text for `error_state`.
    ///
    /// Unclassified faults keep the raw error text as detail.
    pub fn message(&self) -> String {
        match self.status() {
            None | Some(ProcessStatus::GeneralError) => self.to_string(),
            Some(status) => status.description().to_string(),
        }
    }
}
