//! HTTP utilities for the Everactive client.
//!
//! One [`HttpClient`] wraps the long-lived `reqwest` transport (connection
//! pool, TLS context) together with the normalized API base URL. It is cheap
//! to clone and is shared by the token cache and the API client.

use crate::configuration::ConfigurationError;
use crate::error::{EveractiveError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, trace};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("evercli/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const APPLICATION_JSON: &str = "application/json";

/// Configuration for the shared HTTP transport
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl HttpRequestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn from_configuration(
        configuration: &crate::configuration::Configuration,
    ) -> std::result::Result<Self, ConfigurationError> {
        Ok(Self::new(configuration.api_url()?.to_string()))
    }
}

/// Parse the API base URL and make sure relative paths land underneath it.
///
/// `https://host/api` and `https://host/api/` both normalize to
/// `https://host/api/`; query strings and fragments are dropped.
pub fn normalize_base_url(raw: &str) -> std::result::Result<Url, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// HTTP client wrapper with common request handling logic
#[derive(Clone)]
pub struct HttpClient {
    /// The reqwest client instance
    client: Arc<Client>,
    base_url: Url,
    config: HttpRequestConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers)
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            config,
        })
    }

    /// Get a reference to the HTTP client configuration
    pub fn config(&self) -> &HttpRequestConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                EveractiveError::Configuration(ConfigurationError::InvalidApiUrl {
                    url: format!("{}{}", self.base_url, path),
                    reason: e.to_string(),
                })
            })
    }

    /// Issue an unauthenticated GET and report only the status code.
    pub async fn get_status(&self, path: &str) -> Result<StatusCode> {
        let url = self.endpoint(path)?;
        trace!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Ok(response.status())
    }

    /// POST a form-encoded body; the caller interprets the status.
    pub async fn post_form<F>(&self, path: &str, form: &F) -> Result<Response>
    where
        F: serde::Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        trace!("POST {}", url);

        Ok(self.client.post(url).form(form).send().await?)
    }

    /// Authenticated GET that decodes a successful JSON body into `T`.
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q, bearer_token: &str) -> Result<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(bearer_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Request to {} failed with status {}", path, status);
            return Err(EveractiveError::Api { status });
        }

        Self::read_json(response).await
    }

    /// Read the whole body and decode it as JSON.
    pub async fn read_json<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response_text = response.text().await?;
        trace!("Raw response text for deserialization: {}", response_text);

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            error!(
                "Failed to deserialize response: {}. Raw response: {}",
                e, response_text
            );
            EveractiveError::Decoding(e)
        })
    }

    /// Like [`HttpClient::read_json`], but the body never reaches the log.
    ///
    /// Used for responses that carry credentials. On failure only the
    /// position and category of the error are logged, since the serde
    /// message itself may quote part of the body.
    pub async fn read_json_redacted<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response_text = response.text().await?;
        trace!("Received {} byte response body", response_text.len());

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            error!(
                "Failed to deserialize response: {:?} error at line {} column {}",
                e.classify(),
                e.line(),
                e.column()
            );
            EveractiveError::Decoding(e)
        })
    }
}
