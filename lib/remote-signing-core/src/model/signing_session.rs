use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One signing attempt, as requested by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningSessionRequest {
    /// Base URL of the identity backend REST API
    pub url: String,
    /// Kept as text, validated before the first network call
    pub relying_party_uuid: String,
    pub relying_party_name: String,
    /// ISO 3166-1 alpha-2 country of the national identity number
    pub country: String,
    pub national_identity_number: String,
    pub hash_type: HashType,
    pub display_text: String,
    pub container_path: PathBuf,
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum HashType {
    #[serde(rename = "SHA256")]
    #[strum(serialize = "SHA256")]
    Sha256,
    #[serde(rename = "SHA384")]
    #[strum(serialize = "SHA384")]
    Sha384,
    #[serde(rename = "SHA512")]
    #[strum(serialize = "SHA512")]
    Sha512,
}

/// Signer role and production place, handed to the document untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleData {
    pub roles: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}

/// Backend token of an in-flight certificate or signature operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// `None` for a missing or blank token.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `PNO{country}-{national identity number}` as used by the ETSI
/// certificate choice endpoint.
pub fn semantics_identifier(country: &str, national_identity_number: &str) -> String {
    format!(
        "PNO{}-{}",
        country.trim().to_ascii_uppercase(),
        national_identity_number.trim()
    )
}
