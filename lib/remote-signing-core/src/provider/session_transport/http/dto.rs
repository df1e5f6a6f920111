use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

use crate::model::signing_session::{HashType, SessionId};
use crate::provider::session_transport::dto::{
    CertificateRequest, CertificateValue, EndResult, Interaction, SessionResponse, SessionResult,
    SessionStatusResponse, SignatureRequest, SignatureValue,
};
use crate::provider::session_transport::error::TransportError;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CertificateChoiceRequestRestDTO {
    #[serde(rename = "relyingPartyUUID")]
    pub relying_party_uuid: Uuid,
    pub relying_party_name: String,
    pub certificate_level: String,
}

impl From<CertificateRequest> for CertificateChoiceRequestRestDTO {
    fn from(value: CertificateRequest) -> Self {
        Self {
            relying_party_uuid: value.relying_party_uuid,
            relying_party_name: value.relying_party_name,
            certificate_level: value.certificate_level,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SignatureRequestRestDTO {
    #[serde(rename = "relyingPartyUUID")]
    pub relying_party_uuid: Uuid,
    pub relying_party_name: String,
    pub certificate_level: String,
    pub hash: String,
    pub hash_type: HashType,
    pub allowed_interactions_order: Vec<InteractionRestDTO>,
}

impl From<SignatureRequest> for SignatureRequestRestDTO {
    fn from(value: SignatureRequest) -> Self {
        Self {
            relying_party_uuid: value.relying_party_uuid,
            relying_party_name: value.relying_party_name,
            certificate_level: value.certificate_level,
            hash: value.hash,
            hash_type: value.hash_type,
            allowed_interactions_order: value
                .allowed_interactions_order
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InteractionRestDTO {
    pub r#type: &'static str,
    #[serde(rename = "displayText60")]
    pub display_text_60: Option<String>,
    #[serde(rename = "displayText200")]
    pub display_text_200: Option<String>,
}

impl From<Interaction> for InteractionRestDTO {
    fn from(value: Interaction) -> Self {
        match value {
            Interaction::DisplayTextAndPin { display_text_60 } => Self {
                r#type: "displayTextAndPIN",
                display_text_60: Some(display_text_60),
                display_text_200: None,
            },
            Interaction::ConfirmationMessage { display_text_200 } => Self {
                r#type: "confirmationMessage",
                display_text_60: None,
                display_text_200: Some(display_text_200),
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionStatusQueryRestDTO {
    pub timeout_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct SessionResponseRestDTO {
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
}

impl From<SessionResponseRestDTO> for SessionResponse {
    fn from(value: SessionResponseRestDTO) -> Self {
        Self {
            session_id: value.session_id.and_then(SessionId::new),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum SessionStateRestEnum {
    Running,
    Complete,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionStatusRestDTO {
    pub state: SessionStateRestEnum,
    pub result: Option<SessionResultRestDTO>,
    pub cert: Option<CertificateRestDTO>,
    pub signature: Option<SignatureRestDTO>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionResultRestDTO {
    pub end_result: String,
    pub document_number: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CertificateRestDTO {
    pub value: String,
    pub certificate_level: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SignatureRestDTO {
    pub value: String,
    pub algorithm: Option<String>,
}

impl TryFrom<SessionStatusRestDTO> for SessionStatusResponse {
    type Error = TransportError;

    fn try_from(value: SessionStatusRestDTO) -> Result<Self, Self::Error> {
        match value.state {
            SessionStateRestEnum::Running => Ok(Self::Running),
            SessionStateRestEnum::Complete => {
                let result = value.result.ok_or_else(|| {
                    TransportError::Response("completed session without result".to_string())
                })?;

                let end_result = EndResult::from_str(&result.end_result)
                    .unwrap_or(EndResult::Unknown(result.end_result));

                Ok(Self::Complete(SessionResult {
                    end_result,
                    document_number: result.document_number,
                    certificate: value.cert.map(|cert| CertificateValue {
                        value: cert.value,
                        certificate_level: cert.certificate_level,
                    }),
                    signature: value.signature.map(|signature| SignatureValue {
                        value: signature.value,
                        algorithm: signature.algorithm,
                    }),
                }))
            }
        }
    }
}

/// RFC 7807 style error body returned on rejected requests.
#[derive(Clone, Debug, Deserialize)]
pub(super) struct ProblemRestDTO {
    pub title: Option<String>,
}
