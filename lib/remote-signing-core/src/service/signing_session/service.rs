use ct_codecs::{Base64, Decoder};
use pem::{EncodeConfig, LineEnding, Pem};
use tokio::time::Instant;
use uuid::Uuid;

use super::SigningSessionService;
use super::dto::SigningResponse;
use super::error::SigningSessionError;
use super::state::SessionState;
use super::verification_code::verification_code;
use crate::config::core_config::InteractionType;
use crate::model::process_status::ProcessStatus;
use crate::model::signing_session::{RoleData, SigningSessionRequest, semantics_identifier};
use crate::provider::document_signing::DocumentSigningHandle;
use crate::provider::session_transport::dto::{
    CertificateRequest, Interaction, SignatureRequest,
};
use crate::provider::session_transport::error::TransportOperation;
use crate::provider::session_transport::factory::NetworkConfig;

impl SigningSessionService {
    /// Runs one complete signing session for `document`.
    ///
    /// Progress and the terminal outcome are published through
    /// [`Self::subscribe`]; the same outcome is returned. A call made while
    /// another run is active fails with
    /// [`SigningSessionError::AlreadyRunning`] and leaves the state alone.
    pub async fn process_signing_session(
        &self,
        request: Option<SigningSessionRequest>,
        role_data: Option<RoleData>,
        network: &NetworkConfig,
        document: &dyn DocumentSigningHandle,
    ) -> Result<SigningResponse, SigningSessionError> {
        let _running = self
            .begin_run()
            .ok_or(SigningSessionError::AlreadyRunning)?;

        let Some(request) = request else {
            let error = SigningSessionError::MissingRequest;
            self.publish_failure(&error);
            return Err(error);
        };

        self.reset_values();

        let result = self.run(&request, role_data, network, document).await;
        match &result {
            Ok(response) => {
                tracing::info!("Signature finalized");
                self.publish(SessionState::completed(response.clone()));
            }
            Err(SigningSessionError::Cancelled) => {
                tracing::info!("Signing session cancelled");
            }
            Err(error) => self.publish_failure(error),
        }

        self.task_visibility.dismiss();
        result
    }

    async fn run(
        &self,
        request: &SigningSessionRequest,
        role_data: Option<RoleData>,
        network: &NetworkConfig,
        document: &dyn DocumentSigningHandle,
    ) -> Result<SigningResponse, SigningSessionError> {
        let transport = self.transport_factory.create(&request.url, network)?;

        let relying_party_uuid = Uuid::parse_str(request.relying_party_uuid.trim()).map_err(
            |_| SigningSessionError::InvalidRelyingPartyUuid(request.relying_party_uuid.clone()),
        )?;

        let semantics_identifier =
            semantics_identifier(&request.country, &request.national_identity_number);
        tracing::debug!(%semantics_identifier, "Requesting signer certificate");

        let certificate_request = CertificateRequest {
            relying_party_uuid,
            relying_party_name: request.relying_party_name.clone(),
            certificate_level: self.config.certificate_level.clone(),
        };
        let certificate_result = self
            .poll_until_complete(
                &*transport,
                TransportOperation::CertificateChoice,
                true,
                || transport.get_certificate(&semantics_identifier, certificate_request),
            )
            .await?;

        let document_number = certificate_result.document_number.ok_or_else(|| {
            SigningSessionError::InvalidPayload("document number missing".to_string())
        })?;
        let certificate = certificate_result.certificate.ok_or_else(|| {
            SigningSessionError::InvalidPayload("certificate missing".to_string())
        })?;
        let certificate_pem = certificate_to_pem(&certificate.value)?;
        tracing::info!(
            certificate_level = certificate.certificate_level.as_deref(),
            "Signer certificate received"
        );

        let hash = document
            .prepare_signature(&certificate_pem, role_data)
            .await
            .map_err(SigningSessionError::Document)?;
        if hash.is_empty() {
            return Err(SigningSessionError::EmptyHash);
        }

        let hash_bytes = Base64::decode_to_vec(&hash, None)
            .map_err(|e| SigningSessionError::InvalidPayload(format!("prepared hash: {e}")))?;
        let challenge = verification_code(&hash_bytes);
        self.publish(SessionState::challenge(challenge.clone()));
        if self.task_visibility.power_saving_active() {
            self.task_visibility.show_challenge(&challenge);
        }
        tracing::info!("Verification code published");

        self.sleep_until(Instant::now() + self.config.signature_request_delay).await?;

        let signature_request = SignatureRequest {
            relying_party_uuid,
            relying_party_name: request.relying_party_name.clone(),
            certificate_level: self.config.certificate_level.clone(),
            hash,
            hash_type: request.hash_type,
            allowed_interactions_order: self.interactions(&request.display_text),
        };
        let signature_result = self
            .poll_until_complete(&*transport, TransportOperation::Signature, false, || {
                transport.create_signature(&document_number, signature_request)
            })
            .await?;

        let signature = signature_result.signature.ok_or_else(|| {
            SigningSessionError::InvalidPayload("signature missing".to_string())
        })?;
        let signature_bytes = Base64::decode_to_vec(&signature.value, None)
            .map_err(|e| SigningSessionError::InvalidPayload(format!("signature: {e}")))?;

        document
            .finalize_signature(&signature_bytes)
            .await
            .map_err(SigningSessionError::Document)?;

        Ok(SigningResponse {
            status: ProcessStatus::Ok,
            document_number,
            certificate_pem,
            signature_algorithm: signature.algorithm,
            container_path: request.container_path.clone(),
        })
    }

    fn interactions(&self, display_text: &str) -> Vec<Interaction> {
        match self.config.interaction {
            InteractionType::DisplayTextAndPin => {
                vec![Interaction::display_text_and_pin(display_text)]
            }
            InteractionType::ConfirmationMessage => vec![
                Interaction::confirmation_message(display_text),
                Interaction::display_text_and_pin(display_text),
            ],
        }
    }
}

fn certificate_to_pem(value: &str) -> Result<String, SigningSessionError> {
    let der = Base64::decode_to_vec(value, None)
        .map_err(|e| SigningSessionError::InvalidPayload(format!("certificate: {e}")))?;

    Ok(pem::encode_config(
        &Pem::new("CERTIFICATE", der),
        EncodeConfig::new().set_line_ending(LineEnding::LF),
    ))
}
