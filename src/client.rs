//! High-level client: `DeribitClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared state, and accessor methods.

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Credentials, SessionInfo, SessionState};
use crate::domain::order::client::Orders;
use crate::domain::order::{AmountValidator, DEFAULT_CONTRACT_SIZE};
use crate::domain::orderbook::client::Orderbooks;
use crate::domain::position::client::Positions;
use crate::error::SdkError;
use crate::http::transport::{ReqwestTransport, Transport, DEFAULT_TIMEOUT};
use crate::http::DeribitHttp;

// Re-export sub-client types for convenience.
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::orderbook::client::Orderbooks as OrderbooksClient;
pub use crate::domain::position::client::Positions as PositionsClient;

/// Environment variable holding the API client id.
pub const ENV_API_KEY: &str = "DERIBIT_API_KEY";
/// Environment variable holding the API client secret.
pub const ENV_API_SECRET: &str = "DERIBIT_API_SECRET";
/// Environment variable overriding the JSON-RPC root URL.
pub const ENV_BASE_URL: &str = "DERIBIT_BASE_URL";

/// What order placement does with a business rejection from the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RejectionPolicy {
    /// Log the rejection and return it as [`RpcOutcome::Rejected`](crate::rpc::RpcOutcome).
    #[default]
    Report,
    /// Fail the call with [`SdkError::Rejected`].
    Propagate,
}

/// The primary entry point for the Deribit SDK.
///
/// Provides nested sub-client accessors: `client.orderbooks()`,
/// `client.orders()`, `client.positions()`. Clones share one session.
pub struct DeribitClient<T = ReqwestTransport> {
    pub(crate) http: Arc<DeribitHttp<T>>,
    pub(crate) validator: AmountValidator,
    pub(crate) rejection_policy: RejectionPolicy,
    /// Order id of the last order placed through this client.
    pub(crate) current_order: Arc<RwLock<Option<String>>>,
}

impl DeribitClient {
    pub fn builder() -> DeribitClientBuilder {
        DeribitClientBuilder::default()
    }
}

impl<T: Transport> DeribitClient<T> {
    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orderbooks(&self) -> Orderbooks<'_, T> {
        Orderbooks { client: self }
    }

    pub fn orders(&self) -> Orders<'_, T> {
        Orders { client: self }
    }

    pub fn positions(&self) -> Positions<'_, T> {
        Positions { client: self }
    }

    /// Raw dispatcher, for methods without a typed wrapper.
    pub fn http(&self) -> &DeribitHttp<T> {
        &self.http
    }

    pub fn contract_size(&self) -> f64 {
        self.validator.contract_size()
    }

    pub fn rejection_policy(&self) -> RejectionPolicy {
        self.rejection_policy
    }

    // ── Session ──────────────────────────────────────────────────────────

    /// Authenticate eagerly. Private calls also authenticate on demand.
    pub async fn authenticate(&self) -> Result<(), SdkError> {
        self.http
            .authenticate()
            .await
            .map_err(SdkError::AuthenticationRequired)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.http.is_authenticated().await
    }

    pub async fn session_state(&self) -> SessionState {
        self.http.session_state().await
    }

    pub async fn session_info(&self) -> SessionInfo {
        self.http.session_info().await
    }

    // ── Current order ────────────────────────────────────────────────────

    pub async fn current_order_id(&self) -> Option<String> {
        self.current_order.read().await.clone()
    }

    pub(crate) async fn set_current_order(&self, order_id: Option<String>) {
        *self.current_order.write().await = order_id;
    }

    pub(crate) async fn clear_current_order_if(&self, order_id: &str) {
        let mut current = self.current_order.write().await;
        if current.as_deref() == Some(order_id) {
            *current = None;
        }
    }
}

impl<T> Clone for DeribitClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            validator: self.validator,
            rejection_policy: self.rejection_policy,
            current_order: self.current_order.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct DeribitClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    timeout: Duration,
    contract_size: f64,
    allow_zero_amount: bool,
    rejection_policy: RejectionPolicy,
}

impl Default for DeribitClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::TESTNET_API_URL.to_string(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            contract_size: DEFAULT_CONTRACT_SIZE,
            allow_zero_amount: false,
            rejection_policy: RejectionPolicy::default(),
        }
    }
}

impl DeribitClientBuilder {
    /// Defaults overlaid with `DERIBIT_API_KEY`, `DERIBIT_API_SECRET`
    /// and `DERIBIT_BASE_URL` when set. Credentials are only picked up when
    /// both id and secret are present.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            builder.base_url = url;
        }
        if let (Ok(key), Ok(secret)) = (std::env::var(ENV_API_KEY), std::env::var(ENV_API_SECRET)) {
            builder.credentials = Some(Credentials::new(key, secret));
        }
        builder
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        self.credentials = Some(Credentials::new(client_id, client_secret));
        self
    }

    /// Per-request transport timeout. Only used by [`build`](Self::build).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn contract_size(mut self, contract_size: f64) -> Self {
        self.contract_size = contract_size;
        self
    }

    pub fn allow_zero_amount(mut self, allow: bool) -> Self {
        self.allow_zero_amount = allow;
        self
    }

    pub fn rejection_policy(mut self, policy: RejectionPolicy) -> Self {
        self.rejection_policy = policy;
        self
    }

    /// Build over the default `reqwest` transport.
    pub fn build(self) -> Result<DeribitClient, SdkError> {
        let transport = ReqwestTransport::new(self.timeout)?;
        self.build_with_transport(transport)
    }

    /// Build over a caller-supplied transport.
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<DeribitClient<T>, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Config("base_url must not be empty".to_string()));
        }
        let validator = AmountValidator::new(self.contract_size)
            .map_err(|e| SdkError::Config(e.to_string()))?
            .allow_zero(self.allow_zero_amount);

        Ok(DeribitClient {
            http: Arc::new(DeribitHttp::new(
                &self.base_url,
                transport,
                self.credentials,
            )),
            validator,
            rejection_policy: self.rejection_policy,
            current_order: Arc::new(RwLock::new(None)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = DeribitClient::builder().build().unwrap();
        assert_eq!(client.http().base_url(), crate::network::TESTNET_API_URL);
        assert_eq!(client.contract_size(), DEFAULT_CONTRACT_SIZE);
        assert_eq!(client.rejection_policy(), RejectionPolicy::Report);
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        let err = DeribitClient::builder()
            .contract_size(0.0)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SdkError::Config(_)));

        let err = DeribitClient::builder().base_url("  ").build().err().unwrap();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = DeribitClient::builder()
            .base_url("https://www.deribit.com/api/v2/")
            .build()
            .unwrap();
        assert_eq!(client.http().base_url(), crate::network::DEFAULT_API_URL);
    }

    #[test]
    fn test_fresh_client_has_no_session() {
        let client = DeribitClient::builder()
            .credentials("id", "secret")
            .build()
            .unwrap();
        tokio_test::block_on(async {
            assert!(!client.is_authenticated().await);
            assert_eq!(client.session_state().await, SessionState::Unauthenticated);
            assert!(client.current_order_id().await.is_none());
        });
    }
}
