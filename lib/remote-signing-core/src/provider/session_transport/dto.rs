use strum::{Display, EnumString};
use uuid::Uuid;

use crate::model::signing_session::{HashType, SessionId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateRequest {
    pub relying_party_uuid: Uuid,
    pub relying_party_name: String,
    pub certificate_level: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureRequest {
    pub relying_party_uuid: Uuid,
    pub relying_party_name: String,
    pub certificate_level: String,
    /// Base64 encoded digest to sign
    pub hash: String,
    pub hash_type: HashType,
    pub allowed_interactions_order: Vec<Interaction>,
}

/// What the signing device shows to the user, in order of preference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    DisplayTextAndPin { display_text_60: String },
    ConfirmationMessage { display_text_200: String },
}

impl Interaction {
    pub const DISPLAY_TEXT_60_LIMIT: usize = 60;
    pub const DISPLAY_TEXT_200_LIMIT: usize = 200;

    pub fn display_text_and_pin(text: &str) -> Self {
        Self::DisplayTextAndPin {
            display_text_60: truncate_chars(text, Self::DISPLAY_TEXT_60_LIMIT),
        }
    }

    pub fn confirmation_message(text: &str) -> Self {
        Self::ConfirmationMessage {
            display_text_200: truncate_chars(text, Self::DISPLAY_TEXT_200_LIMIT),
        }
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Reply to a session-starting request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionResponse {
    /// `None` when the backend replied without a usable identifier
    pub session_id: Option<SessionId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatusResponse {
    Running,
    Complete(SessionResult),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub end_result: EndResult,
    pub document_number: Option<String>,
    pub certificate: Option<CertificateValue>,
    pub signature: Option<SignatureValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EndResult {
    Ok,
    UserRefused,
    Timeout,
    DocumentUnusable,
    WrongVc,
    RequiredInteractionNotSupportedByApp,
    UserRefusedCertChoice,
    #[strum(serialize = "USER_REFUSED_DISPLAYTEXTANDPIN")]
    UserRefusedDisplayTextAndPin,
    UserRefusedVcChoice,
    #[strum(serialize = "USER_REFUSED_CONFIRMATIONMESSAGE")]
    UserRefusedConfirmationMessage,
    #[strum(serialize = "USER_REFUSED_CONFIRMATIONMESSAGE_WITH_VC_CHOICE")]
    UserRefusedConfirmationMessageWithVcChoice,
    #[strum(default)]
    Unknown(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateValue {
    /// Base64 encoded DER
    pub value: String,
    pub certificate_level: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureValue {
    /// Base64 encoded raw signature
    pub value: String,
    pub algorithm: Option<String>,
}
