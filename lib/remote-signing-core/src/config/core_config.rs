use std::path::Path;
use std::time::Duration;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use figment::providers::{Data, Format};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use strum::{Display, EnumString};

use super::{ConfigError, ConfigParsingError, ConfigValidationError};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoCustomConfig;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppCustomConfigSerdeDTO<Custom> {
    #[serde(default)]
    pub(super) app: Custom,
}

/// Signing settings plus whatever the hosting application keeps under `app`.
///
/// Signing keys live at the document root, next to `app`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig<Custom> {
    #[serde(flatten)]
    pub signing: SigningConfig,
    #[serde(default)]
    pub app: Custom,
}

/// Protocol timing and request parameters of a signing run.
///
/// Every field has a default matching the backend's documented limits, so
/// an empty configuration is valid.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SigningConfig {
    /// Budget accounted per status poll
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub poll_interval: Duration,
    /// Overall ceiling for one backend session
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub session_timeout: Duration,
    /// How long the backend may hold a status request open
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub status_poll_timeout_hint: Duration,
    /// Pause between challenge display and the signature request
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub signature_request_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub request_timeout: Duration,
    pub certificate_level: String,
    pub interaction: InteractionType,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5000),
            session_timeout: Duration::from_millis(80_000),
            status_poll_timeout_hint: Duration::from_millis(5000),
            signature_request_delay: Duration::from_millis(1000),
            request_timeout: Duration::from_millis(30_000),
            certificate_level: "QUALIFIED".to_string(),
            interaction: InteractionType::DisplayTextAndPin,
        }
    }
}

impl SigningConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigValidationError::ZeroDuration("pollInterval"));
        }
        if self.session_timeout.is_zero() {
            return Err(ConfigValidationError::ZeroDuration("sessionTimeout"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigValidationError::ZeroDuration("requestTimeout"));
        }
        if self.session_timeout < self.poll_interval {
            return Err(ConfigValidationError::TimeoutShorterThanInterval);
        }
        if self.status_poll_timeout_hint >= self.request_timeout {
            return Err(ConfigValidationError::HintExceedsRequestTimeout);
        }
        if self.certificate_level.trim().is_empty() {
            return Err(ConfigValidationError::EmptyCertificateLevel);
        }
        Ok(())
    }
}

/// Interaction shown on the signing device.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionType {
    #[default]
    DisplayTextAndPin,
    /// Confirmation message first, PIN-only prompt for apps that cannot show it
    ConfirmationMessage,
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    #[cfg(feature = "config_yaml")]
    pub fn yaml_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Yaml(Yaml::file(p))
    }

    #[cfg(feature = "config_yaml")]
    pub fn yaml_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Yaml(Yaml::string(s.as_ref()))
    }

    #[cfg(feature = "config_json")]
    pub fn json_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Json(Json::file(p))
    }

    #[cfg(feature = "config_json")]
    pub fn json_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Json(Json::string(s.as_ref()))
    }
}

impl<Custom> AppConfig<Custom>
where
    Custom: Serialize + DeserializeOwned + Default,
{
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            #[cfg(feature = "config_yaml")]
            if path
                .as_ref()
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
            {
                inputs.push(InputFormat::yaml_file(path));
                continue;
            }

            #[cfg(feature = "config_json")]
            if path.as_ref().extension() == Some("json".as_ref()) {
                inputs.push(InputFormat::json_file(path));
                continue;
            }

            return Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported file or missing file extension: {:?}",
                path.as_ref().to_str()
            ))
            .into());
        }

        AppConfig::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(configs: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Self, ConfigError> {
        AppConfig::parse(configs.into_iter().map(InputFormat::yaml_str))
    }

    /// Merges the inputs in order, later ones overriding earlier ones, and
    /// validates the result.
    pub fn parse(inputs: impl IntoIterator<Item = InputFormat>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("SIGNING_").split("__").lowercase(false));
        }

        let signing = figment
            .extract::<SigningConfig>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;
        let custom = figment
            .extract::<AppCustomConfigSerdeDTO<Custom>>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;

        signing.validate()?;

        Ok(Self {
            signing,
            app: custom.app,
        })
    }
}
