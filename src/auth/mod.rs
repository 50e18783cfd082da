//! Authentication: client credentials, `public/auth` wire types, session state.
//!
//! ## Security Model
//!
//! - The client secret is only ever serialized into the `public/auth` request.
//! - Access and refresh tokens live inside the session token manager. They are
//!   NEVER exposed via public API and are redacted from `Debug` output.
//! - Expiry is discovered reactively: the server answers a private call with
//!   code `13009` and the dispatcher re-authenticates once.

pub mod session;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use session::{SessionInfo, SessionState};

/// Method used for the credential exchange.
pub const AUTH_METHOD: &str = "public/auth";

/// Grant type for API key authentication.
pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";

// ============================================================================
// Credentials
// ============================================================================

/// API key pair supplied at client construction.
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

    pub(crate) fn auth_params(&self) -> AuthParams<'_> {
        AuthParams {
            grant_type: GRANT_CLIENT_CREDENTIALS,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Params of the `public/auth` request.
#[derive(Serialize)]
pub struct AuthParams<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Result of a successful `public/auth` call.
#[derive(Clone, Deserialize)]
pub struct AuthResult {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl fmt::Debug for AuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResult")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .finish()
    }
}
