use thiserror::Error;

pub mod core_config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parsing error: `{0}`")]
    Parsing(#[from] ConfigParsingError),
    #[error("Validation error: `{0}`")]
    Validation(#[from] ConfigValidationError),
}

#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("General parsing error: `{0}`")]
    GeneralParsingError(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("`{0}` must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("sessionTimeout must not be shorter than pollInterval")]
    TimeoutShorterThanInterval,
    #[error("statusPollTimeoutHint must be shorter than requestTimeout")]
    HintExceedsRequestTimeout,
    #[error("certificateLevel must not be empty")]
    EmptyCertificateLevel,
}
