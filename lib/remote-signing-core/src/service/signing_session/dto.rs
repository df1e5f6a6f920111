use std::path::PathBuf;

use crate::model::process_status::ProcessStatus;

/// Outcome of a completed signing run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningResponse {
    pub status: ProcessStatus,
    /// Backend identifier of the signing device that produced the signature
    pub document_number: String,
    pub certificate_pem: String,
    pub signature_algorithm: Option<String>,
    pub container_path: PathBuf,
}
