use super::dto::SigningResponse;
use crate::model::process_status::ProcessStatus;

/// Caller-visible progress of a signing run.
///
/// Always published as a whole, so observers never see fields from two
/// different phases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub response: Option<SigningResponse>,
    /// Verification code while the user confirms on the device
    pub challenge: Option<String>,
    pub status: Option<ProcessStatus>,
    pub error_state: Option<String>,
    /// User is choosing which registered device receives the request
    pub select_device: bool,
}

impl SessionState {
    pub(super) fn selecting_device() -> Self {
        Self {
            select_device: true,
            ..Default::default()
        }
    }

    pub(super) fn challenge(code: String) -> Self {
        Self {
            challenge: Some(code),
            ..Default::default()
        }
    }

    pub(super) fn completed(response: SigningResponse) -> Self {
        Self {
            status: Some(response.status),
            response: Some(response),
            ..Default::default()
        }
    }

    pub(super) fn failed(status: Option<ProcessStatus>, message: String) -> Self {
        Self {
            status,
            error_state: Some(message),
            ..Default::default()
        }
    }
}
