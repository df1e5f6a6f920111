//! Smart-ID v2 REST binding of [`SessionTransport`].

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use self::dto::{
    CertificateChoiceRequestRestDTO, ProblemRestDTO, SessionResponseRestDTO,
    SessionStatusQueryRestDTO, SessionStatusRestDTO, SignatureRequestRestDTO,
};
use super::SessionTransport;
use super::dto::{CertificateRequest, SessionResponse, SessionStatusResponse, SignatureRequest};
use super::error::{TransportError, TransportOperation};
use crate::model::signing_session::SessionId;
use crate::proto::http_client::{HttpClient, Response};

mod dto;

pub struct HttpSessionTransport {
    base_url: Url,
    http_client: Arc<dyn HttpClient>,
}

impl HttpSessionTransport {
    pub fn new(base_url: Url, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url,
            http_client,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Other(format!("`{}` cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SessionTransport for HttpSessionTransport {
    async fn get_certificate(
        &self,
        semantics_identifier: &str,
        request: CertificateRequest,
    ) -> Result<SessionResponse, TransportError> {
        let url = self.endpoint(&["certificatechoice", "etsi", semantics_identifier])?;

        let response = self
            .http_client
            .post(url.as_str())
            .json(CertificateChoiceRequestRestDTO::from(request))?
            .send()
            .await?;

        check_status(response, TransportOperation::CertificateChoice)?
            .json::<SessionResponseRestDTO>()
            .map(Into::into)
            .map_err(Into::into)
    }

    async fn get_session_status(
        &self,
        session_id: &SessionId,
        timeout_hint: Duration,
    ) -> Result<SessionStatusResponse, TransportError> {
        let url = self.endpoint(&["session", session_id.as_str()])?;

        let response = self
            .http_client
            .get(url.as_str())
            .query(SessionStatusQueryRestDTO {
                timeout_ms: u64::try_from(timeout_hint.as_millis()).unwrap_or(u64::MAX),
            })?
            .send()
            .await?;

        check_status(response, TransportOperation::SessionStatus)?
            .json::<SessionStatusRestDTO>()?
            .try_into()
    }

    async fn create_signature(
        &self,
        document_number: &str,
        request: SignatureRequest,
    ) -> Result<SessionResponse, TransportError> {
        let url = self.endpoint(&["signature", "document", document_number])?;

        let response = self
            .http_client
            .post(url.as_str())
            .json(SignatureRequestRestDTO::from(request))?
            .send()
            .await?;

        check_status(response, TransportOperation::Signature)?
            .json::<SessionResponseRestDTO>()
            .map(Into::into)
            .map_err(Into::into)
    }
}

fn check_status(
    response: Response,
    operation: TransportOperation,
) -> Result<Response, TransportError> {
    if response.status.is_success() {
        return Ok(response);
    }

    let detail = serde_json::from_slice::<ProblemRestDTO>(&response.body)
        .ok()
        .and_then(|problem| problem.title);

    Err(TransportError::Status {
        status: response.status,
        operation,
        detail,
    })
}

#[cfg(test)]
mod test;
