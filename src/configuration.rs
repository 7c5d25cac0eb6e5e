use crate::auth::Credentials;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "evercli";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";

pub const ENV_CONFIG_DIR: &str = "EVERCLI_CONFIG_DIR";
pub const ENV_API_URL: &str = "EVERACTIVE_API_URL";
pub const ENV_CLIENT_ID: &str = "EVERACTIVE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "EVERACTIVE_CLIENT_SECRET";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause:?}")]
    FailedToLoadData {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("missing value for property {name:?}")]
    MissingRequiredPropertyValue { name: String },
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Startup configuration: where the API lives and which client credentials to use.
///
/// Values come from an optional YAML file and are overridden by the
/// `EVERACTIVE_*` environment variables.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_secret: Option<String>,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Configuration {
    pub fn new(api_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            api_url: Some(api_url),
            client_id: Some(client_id),
            client_secret: Some(client_secret),
        }
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(ENV_CONFIG_DIR) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(configuration_directory) => {
                let mut default_config_file_path = configuration_directory;
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);

                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Load the default configuration file when there is one, then apply the environment.
    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;

        let configuration = if default_file_path.exists() {
            debug!(
                "Loading configuration from {}...",
                default_file_path.display()
            );
            Configuration::load_from_file(default_file_path)?
        } else {
            debug!(
                "No configuration file at {}, using the environment only",
                default_file_path.display()
            );
            Configuration::default()
        };

        Ok(configuration.with_environment())
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        let content =
            fs::read_to_string(&path).map_err(|cause| ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            })?;
        serde_yaml::from_str(&content).map_err(|cause| ConfigurationError::FailedToLoadData {
            cause: Box::new(cause),
        })
    }

    /// Overlay values from the process environment.
    pub fn with_environment(self) -> Configuration {
        self.with_lookup(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable lookup. Empty values are ignored.
    pub fn with_lookup<F>(self, lookup: F) -> Configuration
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Configuration {
            api_url: read(ENV_API_URL).or(self.api_url),
            client_id: read(ENV_CLIENT_ID).or(self.client_id),
            client_secret: read(ENV_CLIENT_SECRET).or(self.client_secret),
        }
    }

    fn required(value: &Option<String>, name: &str) -> Result<String, ConfigurationError> {
        match value.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(ConfigurationError::MissingRequiredPropertyValue {
                name: name.to_string(),
            }),
        }
    }

    pub fn api_url(&self) -> Result<Url, ConfigurationError> {
        let raw = Self::required(&self.api_url, ENV_API_URL)?;
        Url::parse(&raw).map_err(|e| ConfigurationError::InvalidApiUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigurationError> {
        Ok(Credentials::new(
            Self::required(&self.client_id, ENV_CLIENT_ID)?,
            Self::required(&self.client_secret, ENV_CLIENT_SECRET)?,
        ))
    }

    /// Check that every required value is present before any network call is made.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.api_url()?;
        self.credentials()?;
        Ok(())
    }
}
