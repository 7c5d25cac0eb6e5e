//! Authenticated client for the Everactive data services API.

use crate::auth::{Clock, Credentials, SystemClock, TokenCache};
use crate::error::Result;
use crate::http_utils::{HttpClient, HttpRequestConfig};
use crate::model::{Eversensor, PagedResult, SteamTrap};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, trace};

pub const HEALTH_PATH: &str = "health";
pub const STEAM_TRAPS_PATH: &str = "ds/v1/steamtraps";
pub const EVERSENSORS_PATH: &str = "ds/v1/eversensors";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Client for the Everactive API.
///
/// Cloning is cheap: clones share the same HTTP transport and token cache.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    tokens: Arc<TokenCache>,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        Self::with_config(HttpRequestConfig::new(base_url), credentials)
    }

    pub fn with_config(config: HttpRequestConfig, credentials: Credentials) -> Result<Self> {
        Self::with_clock(config, credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: HttpRequestConfig,
        credentials: Credentials,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let http = HttpClient::new(config)?;
        debug!("Created API client for {}", http.base_url());

        let tokens = TokenCache::with_clock(http.clone(), credentials, clock);
        Ok(Self {
            http,
            tokens: Arc::new(tokens),
        })
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.tokens
    }

    pub fn base_url(&self) -> &url::Url {
        self.http.base_url()
    }

    /// Check whether the API answers its health endpoint with a 2xx status.
    ///
    /// A non-2xx answer is reported as `Ok(false)`; only a failure to reach
    /// the server at all is an error.
    pub async fn health_check(&self) -> Result<bool> {
        let status = self.http.get_status(HEALTH_PATH).await?;
        debug!("Health check returned {}", status);
        Ok(status.is_success())
    }

    /// Fetch one page of `path` with a valid bearer token and decode the envelope.
    pub async fn get_page<T>(&self, path: &str, page: u32, page_size: u32) -> Result<PagedResult<T>>
    where
        T: DeserializeOwned,
    {
        let token = self.tokens.get_valid_token().await?;
        trace!("Fetching {} page {} (size {})", path, page, page_size);

        let query = [("page", page), ("pageSize", page_size)];
        let result: PagedResult<T> = self
            .http
            .get_json(path, &query, token.access_token())
            .await?;

        debug!(
            "Received {} records from {} (pagination: {:?})",
            result.len(),
            path,
            result.pagination
        );
        Ok(result)
    }

    pub async fn list_steam_traps_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<SteamTrap>> {
        self.get_page(STEAM_TRAPS_PATH, page, page_size).await
    }

    /// List the steam traps on one page.
    pub async fn list_steam_traps(&self, page: u32, page_size: u32) -> Result<Vec<SteamTrap>> {
        Ok(self
            .list_steam_traps_page(page, page_size)
            .await?
            .into_data())
    }

    pub async fn list_eversensors_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<Eversensor>> {
        self.get_page(EVERSENSORS_PATH, page, page_size).await
    }

    /// List the Eversensors on one page.
    pub async fn list_eversensors(&self, page: u32, page_size: u32) -> Result<Vec<Eversensor>> {
        Ok(self
            .list_eversensors_page(page, page_size)
            .await?
            .into_data())
    }
}
