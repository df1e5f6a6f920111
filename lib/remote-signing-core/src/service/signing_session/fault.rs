//! Mapping of transport and backend outcomes onto [`ProcessStatus`].
//!
//! Every function here is total and never yields [`ProcessStatus::Ok`].

use crate::model::process_status::ProcessStatus;
use crate::proto::http_client::StatusCode;
use crate::provider::session_transport::dto::EndResult;
use crate::provider::session_transport::error::{TransportError, TransportOperation};

/// Backend error texts that only ever reach the client as free text.
const MESSAGE_FAULTS: [(&str, ProcessStatus); 5] = [
    ("Too Many Requests", ProcessStatus::TooManyRequests),
    (
        "OCSP response not in valid time slot",
        ProcessStatus::OcspInvalidTimeSlot,
    ),
    ("Certificate status: revoked", ProcessStatus::CertificateRevoked),
    ("Failed to connect", ProcessStatus::NoResponse),
    (
        "Failed to create ssl connection with host",
        ProcessStatus::InvalidSslHandshake,
    ),
];

pub fn classify_http_status(status: StatusCode, operation: TransportOperation) -> ProcessStatus {
    match status.0 {
        401 | 403 => ProcessStatus::InvalidAccessRights,
        404 => match operation {
            TransportOperation::SessionStatus => ProcessStatus::SessionNotFound,
            TransportOperation::CertificateChoice | TransportOperation::Signature => {
                ProcessStatus::AccountNotFound
            }
        },
        409 => ProcessStatus::ExceededUnsuccessfulRequests,
        429 => ProcessStatus::TooManyRequests,
        471 => ProcessStatus::NotQualified,
        480 => ProcessStatus::OldApi,
        580 => ProcessStatus::UnderMaintenance,
        _ => ProcessStatus::TechnicalError,
    }
}

pub fn classify_transport_error(error: &TransportError) -> ProcessStatus {
    match error {
        TransportError::Status {
            status, operation, ..
        } => classify_http_status(*status, *operation),
        TransportError::Connection(_) => ProcessStatus::NoResponse,
        TransportError::Tls(_) => ProcessStatus::InvalidSslHandshake,
        TransportError::Response(_) => ProcessStatus::TechnicalError,
        TransportError::Other(message) => classify_message(message),
    }
}

pub fn classify_end_result(end_result: &EndResult) -> ProcessStatus {
    match end_result {
        EndResult::UserRefused => ProcessStatus::UserRefused,
        EndResult::Timeout => ProcessStatus::Timeout,
        EndResult::DocumentUnusable => ProcessStatus::DocumentUnusable,
        EndResult::WrongVc => ProcessStatus::WrongVc,
        EndResult::RequiredInteractionNotSupportedByApp => {
            ProcessStatus::RequiredInteractionNotSupportedByApp
        }
        EndResult::UserRefusedCertChoice => ProcessStatus::UserRefusedCertChoice,
        EndResult::UserRefusedDisplayTextAndPin => ProcessStatus::UserRefusedDisplayTextAndPin,
        EndResult::UserRefusedVcChoice => ProcessStatus::UserRefusedVcChoice,
        EndResult::UserRefusedConfirmationMessage => ProcessStatus::UserRefusedConfirmationMessage,
        EndResult::UserRefusedConfirmationMessageWithVcChoice => {
            ProcessStatus::UserRefusedConfirmationMessageWithVcChoice
        }
        // OK only gets here when its payload was unusable
        EndResult::Ok | EndResult::Unknown(_) => ProcessStatus::TechnicalError,
    }
}

pub fn classify_message(message: &str) -> ProcessStatus {
    MESSAGE_FAULTS
        .iter()
        .find(|(needle, _)| message.contains(needle))
        .map(|(_, status)| *status)
        .unwrap_or(ProcessStatus::GeneralError)
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(401, TransportOperation::CertificateChoice, ProcessStatus::InvalidAccessRights)]
    #[case(403, TransportOperation::Signature, ProcessStatus::InvalidAccessRights)]
    #[case(404, TransportOperation::CertificateChoice, ProcessStatus::AccountNotFound)]
    #[case(404, TransportOperation::Signature, ProcessStatus::AccountNotFound)]
    #[case(404, TransportOperation::SessionStatus, ProcessStatus::SessionNotFound)]
    #[case(409, TransportOperation::CertificateChoice, ProcessStatus::ExceededUnsuccessfulRequests)]
    #[case(429, TransportOperation::SessionStatus, ProcessStatus::TooManyRequests)]
    #[case(471, TransportOperation::CertificateChoice, ProcessStatus::NotQualified)]
    #[case(480, TransportOperation::Signature, ProcessStatus::OldApi)]
    #[case(580, TransportOperation::SessionStatus, ProcessStatus::UnderMaintenance)]
    #[case(400, TransportOperation::Signature, ProcessStatus::TechnicalError)]
    #[case(500, TransportOperation::SessionStatus, ProcessStatus::TechnicalError)]
    #[case(503, TransportOperation::CertificateChoice, ProcessStatus::TechnicalError)]
    fn test_classify_http_status(
        #[case] status: u16,
        #[case] operation: TransportOperation,
        #[case] expected: ProcessStatus,
    ) {
        assert_eq!(classify_http_status(StatusCode(status), operation), expected);
    }

    #[test]
    fn test_classify_http_status_never_ok() {
        let operations = [
            TransportOperation::CertificateChoice,
            TransportOperation::Signature,
            TransportOperation::SessionStatus,
        ];

        for status in 100..=999 {
            for operation in operations {
                assert_ne!(
                    classify_http_status(StatusCode(status), operation),
                    ProcessStatus::Ok
                );
            }
        }
    }

    #[rstest]
    #[case("HTTP 429 Too Many Requests", ProcessStatus::TooManyRequests)]
    #[case("OCSP response not in valid time slot", ProcessStatus::OcspInvalidTimeSlot)]
    #[case("Certificate status: revoked", ProcessStatus::CertificateRevoked)]
    #[case("Failed to connect: dns error", ProcessStatus::NoResponse)]
    #[case(
        "Failed to create ssl connection with host: rp-api.smart-id.com",
        ProcessStatus::InvalidSslHandshake
    )]
    #[case("disk full", ProcessStatus::GeneralError)]
    #[case("", ProcessStatus::GeneralError)]
    fn test_classify_message(#[case] message: &str, #[case] expected: ProcessStatus) {
        assert_eq!(classify_message(message), expected);
    }

    #[rstest]
    #[case(TransportError::Connection("dns error: unknown host".to_string()), ProcessStatus::NoResponse)]
    #[case(TransportError::Tls("peer not verified".to_string()), ProcessStatus::InvalidSslHandshake)]
    #[case(TransportError::Response("missing field `state`".to_string()), ProcessStatus::TechnicalError)]
    #[case(TransportError::Other("Too Many Requests".to_string()), ProcessStatus::TooManyRequests)]
    #[case(TransportError::Other("boom".to_string()), ProcessStatus::GeneralError)]
    #[case(
        TransportError::Status {
            status: StatusCode(404),
            operation: TransportOperation::SessionStatus,
            detail: Some("Not Found".to_string()),
        },
        ProcessStatus::SessionNotFound
    )]
    fn test_classify_transport_error(#[case] error: TransportError, #[case] expected: ProcessStatus) {
        assert_eq!(classify_transport_error(&error), expected);
    }

    #[rstest]
    #[case("USER_REFUSED", ProcessStatus::UserRefused)]
    #[case("TIMEOUT", ProcessStatus::Timeout)]
    #[case("DOCUMENT_UNUSABLE", ProcessStatus::DocumentUnusable)]
    #[case("WRONG_VC", ProcessStatus::WrongVc)]
    #[case("REQUIRED_INTERACTION_NOT_SUPPORTED_BY_APP", ProcessStatus::RequiredInteractionNotSupportedByApp)]
    #[case("USER_REFUSED_CERT_CHOICE", ProcessStatus::UserRefusedCertChoice)]
    #[case("USER_REFUSED_DISPLAYTEXTANDPIN", ProcessStatus::UserRefusedDisplayTextAndPin)]
    #[case("USER_REFUSED_VC_CHOICE", ProcessStatus::UserRefusedVcChoice)]
    #[case("USER_REFUSED_CONFIRMATIONMESSAGE", ProcessStatus::UserRefusedConfirmationMessage)]
    #[case(
        "USER_REFUSED_CONFIRMATIONMESSAGE_WITH_VC_CHOICE",
        ProcessStatus::UserRefusedConfirmationMessageWithVcChoice
    )]
    #[case("SOMETHING_NEW", ProcessStatus::TechnicalError)]
    fn test_classify_end_result(#[case] end_result: &str, #[case] expected: ProcessStatus) {
        let end_result = EndResult::from_str(end_result).unwrap();

        assert_eq!(classify_end_result(&end_result), expected);
    }

    #[test]
    fn test_end_result_status_shares_wire_name() {
        let end_result = EndResult::from_str("USER_REFUSED_VC_CHOICE").unwrap();

        assert_eq!(
            classify_end_result(&end_result).to_string(),
            end_result.to_string()
        );
    }
}
