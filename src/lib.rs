//! The Everactive API client library.
//!
//! This crate provides an authenticated client for the Everactive data
//! services API: OAuth2 client-credentials token caching with lazy refresh,
//! bearer-authenticated requests and decoding of the paginated JSON envelope
//! into typed records.
//!
//! # Modules
//!
//! - `auth`: Credentials, bearer tokens and the token cache
//! - `client`: The API client and its endpoint operations
//! - `commands`: CLI command parsing
//! - `configuration`: Startup configuration from the environment and config file
//! - `error`: Error taxonomy of the request pipeline
//! - `format`: JSON and CSV output formatting
//! - `http_utils`: Shared HTTP transport
//! - `model`: Response envelope and domain records

pub mod auth;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod http_utils;
pub mod model;

pub use auth::{Clock, Credentials, SystemClock, Token, TokenCache};
pub use client::ApiClient;
pub use error::{EveractiveError, Result};
pub use model::{Eversensor, PagedResult, PaginationInfo, SteamTrap};
