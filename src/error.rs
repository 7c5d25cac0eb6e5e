use reqwest::StatusCode;
use thiserror::Error;

use crate::{configuration::ConfigurationError, exit_codes::EvercliExitCode};

/// Errors surfaced by the authenticated request pipeline.
///
/// Every failure reaches the caller as one of these variants. Nothing in the
/// library converts an error into an empty result.
#[derive(Debug, Error)]
pub enum EveractiveError {
    /// Required startup input (base URL, client id or secret) is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The credential exchange was rejected by the authorization server
    #[error("Authentication failed with status {status}")]
    Authentication { status: StatusCode },
    /// The API could not be reached (connection, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// An authenticated call reached the server but did not succeed
    #[error("API request failed with status {status}")]
    Api { status: StatusCode },
    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),
}

impl EveractiveError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            EveractiveError::Authentication { status } | EveractiveError::Api { status } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> EvercliExitCode {
        match self {
            EveractiveError::Configuration(_) => EvercliExitCode::ConfigError,
            EveractiveError::Authentication { .. } => EvercliExitCode::AuthError,
            EveractiveError::Transport(_) => EvercliExitCode::NetworkError,
            EveractiveError::Api { .. } => EvercliExitCode::ApiError,
            EveractiveError::Decoding(_) => EvercliExitCode::DataError,
        }
    }
}

pub type Result<T> = std::result::Result<T, EveractiveError>;
