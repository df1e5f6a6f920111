use strum::Display;
use thiserror::Error;

use crate::proto::http_client;
use crate::proto::http_client::StatusCode;

/// Backend operation a transport outcome belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum TransportOperation {
    #[strum(serialize = "certificate choice")]
    CertificateChoice,
    #[strum(serialize = "signature")]
    Signature,
    #[strum(serialize = "session status")]
    SessionStatus,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{operation} request rejected with HTTP status {status}")]
    Status {
        status: StatusCode,
        operation: TransportOperation,
        /// Problem title from the response body, if there was one
        detail: Option<String>,
    },
    #[error("Failed to connect: {0}")]
    Connection(String),
    #[error("Failed to create ssl connection with host: {0}")]
    Tls(String),
    #[error("Invalid response: {0}")]
    Response(String),
    #[error("{0}")]
    Other(String),
}

impl From<http_client::Error> for TransportError {
    fn from(error: http_client::Error) -> Self {
        match error {
            http_client::Error::Connect(message) | http_client::Error::Timeout(message) => {
                Self::Connection(message)
            }
            http_client::Error::Tls(message) => Self::Tls(message),
            http_client::Error::JsonError(error) => Self::Response(error.to_string()),
            error @ (http_client::Error::HttpError(_)
            | http_client::Error::UrlEncode(_)
            | http_client::Error::Other(_)) => Self::Other(error.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportFactoryError {
    #[error("Invalid certificate in trust bundle: {0}")]
    InvalidCertificate(String),
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),
    #[error("Invalid backend URL `{0}`")]
    InvalidUrl(String),
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}
