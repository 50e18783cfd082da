//! Session state and the token lifecycle manager.

use std::fmt;

use async_lock::{Mutex, MutexGuard, RwLock};
use chrono::{DateTime, Utc};

use crate::auth::{AuthResult, Credentials};
use crate::error::AuthError;

/// Consecutive authentication failures after which the session reports `Failed`.
const FAILED_AFTER: u32 = 2;

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    /// Authentication failed twice in a row.
    Failed,
}

/// Token-free snapshot of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub state: SessionState,
    /// Bumped every time a new token pair is installed.
    pub generation: u64,
    /// Whether the server issued a refresh token with the current pair.
    pub refreshable: bool,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
    pub obtained_at: Option<DateTime<Utc>>,
}

/// Access token handed to the dispatcher for a single request.
#[derive(Clone)]
pub(crate) struct SessionToken {
    pub access_token: String,
    pub generation: u64,
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Session {
    access_token: String,
    refresh_token: String,
    authenticated: bool,
    generation: u64,
    expires_in: Option<u64>,
    scope: Option<String>,
    obtained_at: Option<DateTime<Utc>>,
    consecutive_failures: u32,
}

impl Session {
    fn state(&self) -> SessionState {
        if self.authenticated {
            SessionState::Authenticated
        } else if self.consecutive_failures >= FAILED_AFTER {
            SessionState::Failed
        } else {
            SessionState::Unauthenticated
        }
    }

    fn token(&self) -> Option<SessionToken> {
        if self.authenticated && !self.access_token.is_empty() {
            Some(SessionToken {
                access_token: self.access_token.clone(),
                generation: self.generation,
            })
        } else {
            None
        }
    }
}

/// Owns the token pair for one client instance.
///
/// Reads go through an async `RwLock`. Token acquisition is serialized by
/// `gate`: callers hold it across check-authenticate-install so only one
/// `public/auth` exchange is in flight per client.
pub(crate) struct TokenManager {
    credentials: Option<Credentials>,
    session: RwLock<Session>,
    gate: Mutex<()>,
}

impl TokenManager {
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            session: RwLock::new(Session::default()),
            gate: Mutex::new(()),
        }
    }

    pub fn credentials(&self) -> Result<&Credentials, AuthError> {
        self.credentials.as_ref().ok_or(AuthError::MissingCredentials)
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    pub async fn current(&self) -> Option<SessionToken> {
        self.session.read().await.token()
    }

    pub async fn state(&self) -> SessionState {
        self.session.read().await.state()
    }

    pub async fn info(&self) -> SessionInfo {
        let session = self.session.read().await;
        SessionInfo {
            state: session.state(),
            generation: session.generation,
            refreshable: !session.refresh_token.is_empty(),
            expires_in: session.expires_in,
            scope: session.scope.clone(),
            obtained_at: session.obtained_at,
        }
    }

    /// Replace the token pair. All-or-nothing: an unusable result leaves the
    /// session untouched and counts as a failure.
    pub async fn install(&self, result: AuthResult) -> Result<SessionToken, AuthError> {
        if result.access_token.is_empty() {
            self.record_failure().await;
            return Err(AuthError::MalformedResult(
                "empty access_token".to_string(),
            ));
        }

        let mut session = self.session.write().await;
        let generation = session.generation + 1;
        let token = SessionToken {
            access_token: result.access_token.clone(),
            generation,
        };
        *session = Session {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            authenticated: true,
            generation,
            expires_in: result.expires_in,
            scope: result.scope,
            obtained_at: Some(Utc::now()),
            consecutive_failures: 0,
        };
        Ok(token)
    }

    pub async fn record_failure(&self) {
        let mut session = self.session.write().await;
        session.consecutive_failures = session.consecutive_failures.saturating_add(1);
    }

    /// Drop the token pair if it is still the one identified by `generation`.
    ///
    /// Returns `false` when a newer pair has already been installed.
    pub async fn invalidate(&self, generation: u64) -> bool {
        let mut session = self.session.write().await;
        if session.generation != generation {
            return false;
        }
        session.access_token.clear();
        session.refresh_token.clear();
        session.authenticated = false;
        true
    }

    #[cfg(test)]
    async fn refresh_token(&self) -> String {
        self.session.read().await.refresh_token.clone()
    }
}
