//! # Deribit SDK
//!
//! An async Rust client for the Deribit JSON-RPC API over HTTP.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: JSON-RPC envelopes, error types, shared enums, network URLs
//! 2. **Auth**: Client credentials and the generation-tracked token session
//! 3. **HTTP API**: `DeribitHttp`, a dispatcher that re-authenticates once on session expiry
//! 4. **Domain**: Order books, orders (with amount validation), positions
//! 5. **High-Level Client**: `DeribitClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deribit_sdk::prelude::*;
//!
//! let client = DeribitClient::builder()
//!     .credentials("client_id", "client_secret")
//!     .build()?;
//!
//! let book = client.orderbooks().get("BTC-PERPETUAL").await?;
//! let placed = client.orders().buy("BTC-PERPETUAL", 10.0, 50_000.0).await?;
//! let positions = client.positions().get("BTC").await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared enums and serde helpers used across all domains.
pub mod shared;

/// JSON-RPC 2.0 envelopes and outcome types.
pub mod rpc;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Credentials, `public/auth` wire types, and session tracking.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Transport seam and JSON-RPC dispatcher.
pub mod http;

// ── Layer 4: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `DeribitClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared enums
    pub use crate::shared::Side;

    // Domain types: orderbook
    pub use crate::domain::orderbook::{BookLevel, OrderBook, ORDER_BOOK_DEPTH};

    // Domain types: order
    pub use crate::domain::order::{
        validate_amount, AmountValidator, Fill, Order, OrderResult, OrderState, OrderType,
        DEFAULT_CONTRACT_SIZE,
    };

    // Domain types: position
    pub use crate::domain::position::{Direction, Position};

    // JSON-RPC
    pub use crate::rpc::{JsonRpcResponse, RpcError, RpcOutcome, AUTH_ERROR_CODE};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError, ValidationError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, TESTNET_API_URL};

    // Auth
    pub use crate::auth::{Credentials, SessionInfo, SessionState};

    // HTTP
    pub use crate::http::{DeribitHttp, HttpResponse, ReqwestTransport, Transport};

    // High-level client + sub-clients
    pub use crate::client::{
        DeribitClient, DeribitClientBuilder, OrderbooksClient, OrdersClient, PositionsClient,
        RejectionPolicy,
    };
}
