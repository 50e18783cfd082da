//! Request dispatcher: `DeribitHttp`.
//!
//! Builds JSON-RPC envelopes, attaches the bearer token to `private/` calls,
//! and re-authenticates at most once per logical call when the server answers
//! with the session-expiry code. Transport failures are never retried here.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

use crate::auth::session::{SessionToken, TokenManager};
use crate::auth::{AuthResult, Credentials, SessionInfo, SessionState, AUTH_METHOD};
use crate::error::{AuthError, HttpError, SdkError};
use crate::http::transport::{ReqwestTransport, Transport};
use crate::rpc::{is_private, JsonRpcRequest, JsonRpcResponse};

/// Re-authentication retries allowed per logical call.
const MAX_REAUTH_RETRIES: u32 = 1;

/// Longest body excerpt carried in errors and logs.
const BODY_EXCERPT: usize = 512;

/// Low-level JSON-RPC client for the Deribit API.
///
/// One instance owns one session and one request-id counter.
pub struct DeribitHttp<T = ReqwestTransport> {
    base_url: String,
    transport: T,
    tokens: TokenManager,
    request_id: AtomicU64,
}

/// Failure of a single envelope round trip.
enum SendError {
    Encode(serde_json::Error),
    Transport(HttpError),
    Protocol(String),
}

impl From<SendError> for SdkError {
    fn from(e: SendError) -> Self {
        match e {
            SendError::Encode(e) => SdkError::Serde(e),
            SendError::Transport(e) => SdkError::Transport(e),
            SendError::Protocol(msg) => SdkError::Protocol(msg),
        }
    }
}

impl From<SendError> for AuthError {
    fn from(e: SendError) -> Self {
        match e {
            SendError::Encode(e) => AuthError::Protocol(e.to_string()),
            SendError::Transport(e) => AuthError::Transport(e),
            SendError::Protocol(msg) => AuthError::Protocol(msg),
        }
    }
}

impl<T: Transport> DeribitHttp<T> {
    pub fn new(base_url: &str, transport: T, credentials: Option<Credentials>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            tokens: TokenManager::new(credentials),
            request_id: AtomicU64::new(1),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Session ──────────────────────────────────────────────────────────

    /// Exchange the client credentials for a fresh token pair.
    ///
    /// Replaces any current pair on success. On failure the session is left
    /// as it was.
    pub async fn authenticate(&self) -> Result<(), AuthError> {
        let _guard = self.tokens.lock().await;
        self.exchange().await.map(|_| ())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.current().await.is_some()
    }

    pub async fn session_state(&self) -> SessionState {
        self.tokens.state().await
    }

    pub async fn session_info(&self) -> SessionInfo {
        self.tokens.info().await
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    /// Send `method` with `params` and return the decoded envelope.
    ///
    /// Business errors come back as `Ok` with `error` set. Code `13009` on a
    /// private call triggers one re-authentication and one resend; a second
    /// `13009` fails with [`SdkError::SessionRejected`].
    pub async fn dispatch<P>(&self, method: &str, params: &P) -> Result<JsonRpcResponse, SdkError>
    where
        P: Serialize + ?Sized,
    {
        if !is_private(method) {
            return Ok(self.send(method, params, None).await?);
        }

        let mut token = self.ensure_token().await?;
        let mut reauths = 0;

        loop {
            let response = self.send(method, params, Some(&token)).await?;
            let rejection = match &response.error {
                Some(error) if error.is_auth_error() => error.clone(),
                _ => return Ok(response),
            };

            if reauths >= MAX_REAUTH_RETRIES {
                self.tokens.invalidate(token.generation).await;
                tracing::warn!(
                    method,
                    code = rejection.code,
                    "Session rejected again after re-authentication"
                );
                return Err(SdkError::SessionRejected(rejection));
            }

            reauths += 1;
            tracing::warn!(
                method,
                generation = token.generation,
                "Session expired, re-authenticating"
            );
            token = self
                .reauthenticate(token.generation)
                .await
                .map_err(SdkError::ReAuthenticationFailed)?;
        }
    }

    /// Current token, authenticating first if there is none.
    async fn ensure_token(&self) -> Result<SessionToken, SdkError> {
        if let Some(token) = self.tokens.current().await {
            return Ok(token);
        }

        let _guard = self.tokens.lock().await;
        // Another caller may have authenticated while we waited on the gate.
        if let Some(token) = self.tokens.current().await {
            return Ok(token);
        }
        self.exchange()
            .await
            .map_err(SdkError::AuthenticationRequired)
    }

    /// Replace the token identified by `stale`, unless a concurrent caller
    /// already did.
    async fn reauthenticate(&self, stale: u64) -> Result<SessionToken, AuthError> {
        let _guard = self.tokens.lock().await;
        if !self.tokens.invalidate(stale).await {
            if let Some(token) = self.tokens.current().await {
                tracing::debug!(
                    generation = token.generation,
                    "Using token refreshed by a concurrent call"
                );
                return Ok(token);
            }
        }
        self.exchange().await
    }

    /// `public/auth` round trip. Caller must hold the token gate.
    async fn exchange(&self) -> Result<SessionToken, AuthError> {
        let outcome = match self.tokens.credentials() {
            Ok(credentials) => self.request_tokens(credentials).await,
            Err(e) => Err(e),
        };

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                self.tokens.record_failure().await;
                tracing::warn!(error = %e, "Authentication failed");
                return Err(e);
            }
        };

        let token = self.tokens.install(result).await?;
        tracing::info!(generation = token.generation, "Authenticated");
        Ok(token)
    }

    async fn request_tokens(&self, credentials: &Credentials) -> Result<AuthResult, AuthError> {
        let response = self
            .send(AUTH_METHOD, &credentials.auth_params(), None)
            .await?;
        if let Some(error) = response.error {
            return Err(AuthError::Rejected(error));
        }
        let result = response.result.unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|e| AuthError::MalformedResult(e.to_string()))
    }

    // ── Internal HTTP ────────────────────────────────────────────────────

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn send<P>(
        &self,
        method: &str,
        params: &P,
        token: Option<&SessionToken>,
    ) -> Result<JsonRpcResponse, SendError>
    where
        P: Serialize + ?Sized,
    {
        let id = self.next_id();
        let body = JsonRpcRequest::new(id, method, params)
            .to_vec()
            .map_err(SendError::Encode)?;

        let mut headers = Vec::with_capacity(2);
        headers.push(("Content-Type", "application/json".to_string()));
        if let Some(token) = token {
            headers.push(("Authorization", format!("Bearer {}", token.access_token)));
        }

        let url = format!("{}/{}", self.base_url, method);
        tracing::debug!(method, id, "Sending JSON-RPC request");

        let resp = self
            .transport
            .post(&url, &headers, body)
            .await
            .map_err(SendError::Transport)?;

        if !resp.is_success() && resp.body.is_empty() {
            return Err(SendError::Transport(HttpError::Status {
                status: resp.status,
                body: String::new(),
            }));
        }

        match JsonRpcResponse::decode(&resp.body) {
            Ok(response) => match response.id {
                Some(echoed) if echoed != id => {
                    tracing::error!(method, id, echoed, "JSON-RPC response id mismatch");
                    Err(SendError::Protocol(format!(
                        "response id {echoed} does not match request id {id}"
                    )))
                }
                _ => Ok(response),
            },
            Err(e) => {
                let excerpt = excerpt(&resp.body);
                tracing::error!(
                    method,
                    id,
                    status = resp.status,
                    error = %e,
                    "Undecodable JSON-RPC response: {excerpt}"
                );
                if resp.is_success() {
                    Err(SendError::Protocol(e.to_string()))
                } else {
                    Err(SendError::Transport(HttpError::Status {
                        status: resp.status,
                        body: excerpt,
                    }))
                }
            }
        }
    }
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(BODY_EXCERPT).collect()
}
