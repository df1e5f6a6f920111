use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Terminal outcome of a signing run as exposed to the caller.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    Ok,
    NoResponse,
    NotMidClient,
    AccountNotFound,
    UserCancelled,
    UserRefused,
    Timeout,
    SessionNotFound,
    #[serde(rename = "MISSING_SESSIONID")]
    #[strum(serialize = "MISSING_SESSIONID")]
    MissingSessionId,
    InvalidAccessRights,
    InvalidSslHandshake,
    ExceededUnsuccessfulRequests,
    TooManyRequests,
    NotQualified,
    OldApi,
    UnderMaintenance,
    TechnicalError,
    OcspInvalidTimeSlot,
    CertificateRevoked,
    GeneralError,

    DocumentUnusable,
    WrongVc,
    RequiredInteractionNotSupportedByApp,
    UserRefusedCertChoice,
    #[serde(rename = "USER_REFUSED_DISPLAYTEXTANDPIN")]
    #[strum(serialize = "USER_REFUSED_DISPLAYTEXTANDPIN")]
    UserRefusedDisplayTextAndPin,
    UserRefusedVcChoice,
    #[serde(rename = "USER_REFUSED_CONFIRMATIONMESSAGE")]
    #[strum(serialize = "USER_REFUSED_CONFIRMATIONMESSAGE")]
    UserRefusedConfirmationMessage,
    #[serde(rename = "USER_REFUSED_CONFIRMATIONMESSAGE_WITH_VC_CHOICE")]
    #[strum(serialize = "USER_REFUSED_CONFIRMATIONMESSAGE_WITH_VC_CHOICE")]
    UserRefusedConfirmationMessageWithVcChoice,
}

impl ProcessStatus {
    /// Human-readable text published through `error_state`.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ok => "Signing completed",
            Self::NoResponse => "No response from the signing service, check the network connection",
            Self::NotMidClient => "The user is not a Mobile-ID client",
            Self::AccountNotFound => "No signing account was found for the given personal code",
            Self::UserCancelled => "Signing was cancelled by the user",
            Self::UserRefused => "Signing was refused by the user",
            Self::Timeout => "Signing timed out",
            Self::SessionNotFound => "Signing session was not found or has expired",
            Self::MissingSessionId => "Signing service did not return a session identifier",
            Self::InvalidAccessRights => "Relying party has no access to the signing service",
            Self::InvalidSslHandshake => "Secure connection to the signing service failed",
            Self::ExceededUnsuccessfulRequests => {
                "Too many unsuccessful signing attempts, try again later"
            }
            Self::TooManyRequests => "Too many requests to the signing service, try again later",
            Self::NotQualified => "The signing account is not qualified for signing",
            Self::OldApi => "Signing service no longer supports this client version",
            Self::UnderMaintenance => "Signing service is under maintenance",
            Self::TechnicalError => "Technical error in the signing service",
            Self::OcspInvalidTimeSlot => {
                "Certificate validity confirmation is outside the valid time slot, check the device clock"
            }
            Self::CertificateRevoked => "Signer certificate is revoked",
            Self::GeneralError => "Signing failed",
            Self::DocumentUnusable => "The signing account cannot be used, contact the service provider",
            Self::WrongVc => "Wrong verification code was chosen",
            Self::RequiredInteractionNotSupportedByApp => {
                "The signing app does not support the required interaction, update the app"
            }
            Self::UserRefusedCertChoice => "User refused the certificate choice",
            Self::UserRefusedDisplayTextAndPin => "User refused to enter the PIN",
            Self::UserRefusedVcChoice => "User refused the verification code choice",
            Self::UserRefusedConfirmationMessage => "User refused the confirmation message",
            Self::UserRefusedConfirmationMessageWithVcChoice => {
                "User refused the confirmation message with verification code choice"
            }
        }
    }
}
