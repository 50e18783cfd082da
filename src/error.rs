//! Unified SDK error types.

use thiserror::Error;

use crate::rpc::RpcError;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Authentication required: {0}")]
    AuthenticationRequired(#[source] AuthError),

    #[error("Re-authentication failed: {0}")]
    ReAuthenticationFailed(#[source] AuthError),

    /// The server rejected the session again after the single re-authentication retry.
    #[error("Session rejected after re-authentication: {0}")]
    SessionRejected(RpcError),

    /// Business error surfaced under [`RejectionPolicy::Propagate`](crate::client::RejectionPolicy).
    #[error("Request rejected: {0}")]
    Rejected(RpcError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ValidationError),

    #[error("No current order")]
    NoCurrentOrder,

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Timeout")]
    Timeout,

    /// Non-2xx response that carried no body to decode.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No client credentials configured")]
    MissingCredentials,

    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("Undecodable auth response: {0}")]
    Protocol(String),

    #[error("Auth rejected: {0}")]
    Rejected(RpcError),

    #[error("Auth result unusable: {0}")]
    MalformedResult(String),
}

/// Local amount validation errors. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Amount {amount} is not a multiple of contract size {contract_size}")]
    AmountNotMultipleOfContractSize { amount: f64, contract_size: f64 },

    #[error("Amount {0} is not a finite number")]
    NonFiniteAmount(f64),

    #[error("Amount {0} is negative")]
    NegativeAmount(f64),

    #[error("Amount must be non-zero")]
    ZeroAmount,

    #[error("Contract size {0} must be finite and positive")]
    InvalidContractSize(f64),
}
