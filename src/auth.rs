//! OAuth2 client-credentials token cache.
//!
//! The cache holds one bearer token and refreshes it lazily: a caller asking
//! for a token either gets the cached one or waits for a fresh exchange.

use crate::error::{EveractiveError, Result};
use crate::http_utils::HttpClient;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

pub const AUTH_TOKEN_PATH: &str = "auth/token";
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Client id and secret used for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Body of a successful `POST auth/token`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "access_token")]
    pub access_token: String,
    #[serde(rename = "token_type")]
    pub token_type: String,
    #[serde(rename = "expires_in")]
    pub expires_in: u64,
}

/// A bearer token together with the instant it was issued.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    token_type: String,
    expires_in: u64,
    issued_at: DateTime<Utc>,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: u64,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            expires_in,
            issued_at,
        }
    }

    pub fn from_response(response: TokenResponse, issued_at: DateTime<Utc>) -> Self {
        Self::new(
            response.access_token,
            response.token_type,
            response.expires_in,
            issued_at,
        )
    }

    /// A placeholder that is already expired at `now`.
    pub fn expired(now: DateTime<Utc>) -> Self {
        Self::new(String::new(), String::new(), 0, now)
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        let lifetime = i64::try_from(self.expires_in).unwrap_or(i64::MAX);
        Duration::try_seconds(lifetime)
            .and_then(|lifetime| self.issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// A token is valid strictly before its expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Source of the current UTC time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Owns the current bearer token and performs the credential exchange.
///
/// The expiry check, the exchange and the store happen under one async lock,
/// so concurrent callers that all see an expired token trigger a single
/// exchange and then share its result.
pub struct TokenCache {
    http: HttpClient,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
    token: Mutex<Token>,
}

impl TokenCache {
    pub fn new(http: HttpClient, credentials: Credentials) -> Self {
        Self::with_clock(http, credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(http: HttpClient, credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        let token = Token::expired(clock.now());
        Self {
            http,
            credentials,
            clock,
            token: Mutex::new(token),
        }
    }

    /// Return the cached token if it is still valid, otherwise exchange the
    /// credentials for a new one.
    ///
    /// On failure the cached token is left untouched and the next call will
    /// attempt the exchange again.
    pub async fn get_valid_token(&self) -> Result<Token> {
        let mut token = self.token.lock().await;

        if token.is_valid_at(self.clock.now()) {
            return Ok(token.clone());
        }

        let fresh = self.exchange().await?;
        *token = fresh.clone();

        Ok(fresh)
    }

    /// Mark the cached token as expired so the next request re-authenticates.
    pub async fn invalidate(&self) {
        let mut token = self.token.lock().await;
        *token = Token::expired(self.clock.now());
    }

    async fn exchange(&self) -> Result<Token> {
        debug!(
            "Requesting new access token from {} for client {}",
            AUTH_TOKEN_PATH,
            self.credentials.client_id()
        );

        let params = [
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
        ];

        let response = self.http.post_form(AUTH_TOKEN_PATH, &params).await?;

        let status = response.status();
        if !status.is_success() {
            error!("Authentication request failed with status {}", status);
            return Err(EveractiveError::Authentication { status });
        }

        let token_response: TokenResponse = HttpClient::read_json_redacted(response).await?;
        let token = Token::from_response(token_response, self.clock.now());

        debug!(
            "Authentication successful, token expires at {}",
            token.expires_at()
        );

        Ok(token)
    }
}
