//! Client side of remote (Smart-ID style) document signing.
//!
//! [`RemoteSigningCore`] wires the HTTP session transport and the signing
//! session service from a [`SigningConfig`]. Hosting applications supply the
//! document container through
//! [`provider::document_signing::DocumentSigningHandle`] and observe progress
//! through [`service::signing_session::SigningSessionService::subscribe`].

use std::sync::Arc;

use config::ConfigValidationError;
use config::core_config::SigningConfig;
use provider::session_transport::factory::HttpSessionTransportFactory;
use provider::task_visibility::{NoTaskVisibility, TaskVisibility};
use service::signing_session::SigningSessionService;

pub mod config;
pub mod model;
pub mod proto;
pub mod provider;
pub mod service;

pub struct RemoteSigningCore {
    pub signing_session_service: Arc<SigningSessionService>,
}

impl RemoteSigningCore {
    pub fn new(
        config: SigningConfig,
        task_visibility: Option<Arc<dyn TaskVisibility>>,
    ) -> Result<Self, ConfigValidationError> {
        let transport_factory = Arc::new(HttpSessionTransportFactory::new(config.request_timeout));
        let task_visibility: Arc<dyn TaskVisibility> = match task_visibility {
            Some(task_visibility) => task_visibility,
            None => Arc::new(NoTaskVisibility),
        };

        Ok(Self {
            signing_session_service: Arc::new(SigningSessionService::new(
                config,
                transport_factory,
                task_visibility,
            )?),
        })
    }
}
