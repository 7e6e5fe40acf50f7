// storyspoiler-client/src/auth.rs
// ============================================================================
// Module: StorySpoiler Authentication
// Description: Credential validation and one-shot session acquisition.
// Purpose: Exchange credentials for a bearer session before any step runs.
// Dependencies: reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Authentication is the fatal tier of the harness: a single unauthenticated
//! login request is issued, and any failure here aborts the run before the
//! first scenario step. Credentials are validated at construction so an
//! empty field never reaches the network. Tokens are held by [`Session`]
//! and never surfaced through `Debug` output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::client::routes;

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Login credentials supplied once at harness setup.
///
/// # Invariants
/// - Both fields are non-empty; enforced at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username.
    username: String,
    /// Account password.
    password: String,
}

impl Credentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::InvalidCredentials`] when either field
    /// is empty or whitespace.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, AuthenticationError> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() {
            return Err(AuthenticationError::InvalidCredentials("username is empty"));
        }
        if password.trim().is_empty() {
            return Err(AuthenticationError::InvalidCredentials("password is empty"));
        }
        Ok(Self {
            username,
            password,
        })
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Authenticated session owning the bearer token for one run.
///
/// # Invariants
/// - The token is never refreshed; a session spans exactly one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer access token issued by the login endpoint.
    token: String,
}

impl Session {
    /// Wraps an already-issued access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the bearer token for Authorization headers.
    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal authentication failures.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// A credential field is empty; no request was issued.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(&'static str),
    /// The login request failed before an HTTP response arrived.
    #[error("authentication transport failure: {0}")]
    Transport(String),
    /// The login response body is not valid JSON.
    #[error("authentication response is not valid json: {0}")]
    InvalidBody(String),
    /// The login response carries no usable access token.
    #[error("authentication response (status {status}) carries no access token")]
    TokenMissing {
        /// HTTP status of the login response.
        status: u16,
    },
}

// ============================================================================
// SECTION: Wire Payloads
// ============================================================================

/// Login request payload.
#[derive(Serialize)]
struct LoginRequest<'a> {
    /// Account username.
    username: &'a str,
    /// Account password.
    password: &'a str,
}

/// Login response payload; unknown fields are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    /// Bearer token issued on success; absent on rejection.
    #[serde(default)]
    access_token: Option<String>,
}

// ============================================================================
// SECTION: Authentication
// ============================================================================

/// Exchanges credentials for a bearer session with a single login request.
///
/// # Errors
///
/// Returns [`AuthenticationError::Transport`] when the request cannot be
/// issued or no response arrives, [`AuthenticationError::InvalidBody`] when
/// the response is not JSON, and [`AuthenticationError::TokenMissing`] when
/// the response carries no non-empty token.
pub async fn authenticate(
    base_url: &Url,
    credentials: &Credentials,
    timeout: Duration,
) -> Result<Session, AuthenticationError> {
    let url = base_url
        .join(routes::AUTHENTICATION)
        .map_err(|err| AuthenticationError::Transport(format!("invalid login url: {err}")))?;
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| AuthenticationError::Transport(format!("client build failed: {err}")))?;

    let body = LoginRequest {
        username: &credentials.username,
        password: &credentials.password,
    };
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .map_err(|err| AuthenticationError::Transport(err.to_string()))?;

    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|err| AuthenticationError::Transport(err.to_string()))?;
    let payload: LoginResponse = serde_json::from_str(&text)
        .map_err(|err| AuthenticationError::InvalidBody(err.to_string()))?;

    match payload.access_token {
        Some(token) if !token.trim().is_empty() => Ok(Session::new(token)),
        _ => Err(AuthenticationError::TokenMissing {
            status,
        }),
    }
}
