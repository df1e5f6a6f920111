use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::SessionTransport;
use super::error::TransportFactoryError;
use super::http::HttpSessionTransport;
use crate::proto::http_client::reqwest_client::ReqwestClient;

/// Trust material and proxy setup a transport is built with.
#[derive(Clone, Debug, Default)]
pub struct NetworkConfig {
    /// PEM encoded certificates. When non-empty only these are trusted.
    pub cert_bundle: Vec<String>,
    pub proxy: ProxySetting,
}

#[derive(Clone, Debug, Default)]
pub enum ProxySetting {
    #[default]
    NoProxy,
    /// Proxy taken from the environment (`HTTPS_PROXY` and friends)
    System,
    Manual(ManualProxy),
}

#[derive(Clone, Debug)]
pub struct ManualProxy {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SessionTransportFactory: Send + Sync {
    fn create(
        &self,
        base_url: &str,
        network: &NetworkConfig,
    ) -> Result<Arc<dyn SessionTransport>, TransportFactoryError>;
}

pub struct HttpSessionTransportFactory {
    request_timeout: Duration,
}

impl HttpSessionTransportFactory {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

impl SessionTransportFactory for HttpSessionTransportFactory {
    fn create(
        &self,
        base_url: &str,
        network: &NetworkConfig,
    ) -> Result<Arc<dyn SessionTransport>, TransportFactoryError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| TransportFactoryError::InvalidUrl(base_url.to_string()))?;

        let mut builder = reqwest::Client::builder().timeout(self.request_timeout);

        if !network.cert_bundle.is_empty() {
            builder = builder.tls_built_in_root_certs(false);
            for certificate in &network.cert_bundle {
                builder = builder.add_root_certificate(parse_certificate(certificate)?);
            }
        }

        builder = match &network.proxy {
            ProxySetting::NoProxy => builder.no_proxy(),
            ProxySetting::System => builder,
            ProxySetting::Manual(proxy) => builder.proxy(manual_proxy(proxy)?),
        };

        let client = builder
            .build()
            .map_err(|e| TransportFactoryError::ClientBuild(e.to_string()))?;

        tracing::debug!(%base_url, trusted = network.cert_bundle.len(), "Created session transport");

        Ok(Arc::new(HttpSessionTransport::new(
            base_url,
            Arc::new(ReqwestClient::new(client)),
        )))
    }
}

fn parse_certificate(certificate: &str) -> Result<reqwest::Certificate, TransportFactoryError> {
    let parsed = pem::parse(certificate)
        .map_err(|e| TransportFactoryError::InvalidCertificate(e.to_string()))?;
    if parsed.tag() != "CERTIFICATE" {
        return Err(TransportFactoryError::InvalidCertificate(format!(
            "unexpected PEM label `{}`",
            parsed.tag()
        )));
    }

    reqwest::Certificate::from_der(parsed.contents())
        .map_err(|e| TransportFactoryError::InvalidCertificate(e.to_string()))
}

fn manual_proxy(proxy: &ManualProxy) -> Result<reqwest::Proxy, TransportFactoryError> {
    if proxy.host.trim().is_empty() {
        return Err(TransportFactoryError::InvalidProxy(
            "proxy host is empty".to_string(),
        ));
    }

    let mut result = reqwest::Proxy::all(format!("http://{}:{}", proxy.host, proxy.port))
        .map_err(|e| TransportFactoryError::InvalidProxy(e.to_string()))?;

    if let Some(username) = &proxy.username {
        let password = proxy
            .password
            .as_ref()
            .map(|password| password.expose_secret())
            .unwrap_or_default();
        result = result.basic_auth(username, password);
    }

    Ok(result)
}
