//! JSON-RPC 2.0 envelope codec.
//!
//! Requests serialize their params straight from the caller's type so field
//! order is preserved on the wire. Responses are decoded into
//! [`JsonRpcResponse`], which is only accepted when exactly one of `result`
//! and `error` is present.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::SdkError;

/// JSON-RPC version string sent on every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Server error code for an invalid or expired access token.
pub const AUTH_ERROR_CODE: i64 = 13009;

/// Method prefix of the authenticated namespace.
pub const PRIVATE_PREFIX: &str = "private/";

/// Whether `method` requires a bearer token.
pub fn is_private(method: &str) -> bool {
    method.starts_with(PRIVATE_PREFIX)
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// Outbound request envelope.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a, P: ?Sized> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a P,
}

impl<'a, P: Serialize + ?Sized> JsonRpcRequest<'a, P> {
    pub fn new(id: u64, method: &'a str, params: &'a P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// Error object carried by a rejected response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Whether this is the session-expiry signal.
    pub fn is_auth_error(&self) -> bool {
        self.code == AUTH_ERROR_CODE
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Inbound response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub testnet: bool,
    #[serde(default, rename = "usIn")]
    pub us_in: Option<u64>,
    #[serde(default, rename = "usOut")]
    pub us_out: Option<u64>,
}

/// Keeps an explicit `"result": null` distinguishable from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A response body that is not a well-formed envelope.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON-RPC body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("envelope has both result and error")]
    Ambiguous,

    #[error("envelope has neither result nor error")]
    Empty,
}

impl JsonRpcResponse {
    /// Decode a raw response body.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let response: JsonRpcResponse = serde_json::from_slice(body)?;
        match (&response.result, &response.error) {
            (Some(_), Some(_)) => Err(DecodeError::Ambiguous),
            (None, None) => Err(DecodeError::Empty),
            _ => Ok(response),
        }
    }

    pub fn is_auth_error(&self) -> bool {
        self.error.as_ref().is_some_and(RpcError::is_auth_error)
    }

    /// Split into a typed result or the business rejection.
    pub fn into_outcome<T: DeserializeOwned>(self) -> Result<RpcOutcome<T>, SdkError> {
        if let Some(error) = self.error {
            return Ok(RpcOutcome::Rejected(error));
        }
        let result = self.result.unwrap_or(Value::Null);
        serde_json::from_value(result)
            .map(RpcOutcome::Success)
            .map_err(|e| SdkError::Protocol(format!("unexpected result shape: {e}")))
    }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Result of a call that reached the server.
///
/// `Rejected` carries a business error returned as data; calls that never
/// reached the server surface as `Err(SdkError)` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome<T> {
    Success(T),
    Rejected(RpcError),
}

impl<T> RpcOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, RpcOutcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            RpcOutcome::Success(value) => Some(value),
            RpcOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&RpcError> {
        match self {
            RpcOutcome::Success(_) => None,
            RpcOutcome::Rejected(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, RpcError> {
        match self {
            RpcOutcome::Success(value) => Ok(value),
            RpcOutcome::Rejected(error) => Err(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RpcOutcome<U> {
        match self {
            RpcOutcome::Success(value) => RpcOutcome::Success(f(value)),
            RpcOutcome::Rejected(error) => RpcOutcome::Rejected(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_envelope_fields() {
        let params = json!({"instrument_name": "BTC-PERPETUAL", "depth": 5});
        let request = JsonRpcRequest::new(7, "public/get_order_book", &params);
        let value: Value = serde_json::from_slice(&request.to_vec().unwrap()).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["method"], "public/get_order_book");
        assert_eq!(value["params"]["depth"], 5);
    }

    #[test]
    fn test_is_private() {
        assert!(is_private("private/buy"));
        assert!(!is_private("public/auth"));
        assert!(!is_private("privatebuy"));
    }

    #[test]
    fn test_decode_result() {
        let body = br#"{"jsonrpc":"2.0","id":3,"result":{"x":1},"testnet":true,"usIn":1,"usOut":2}"#;
        let response = JsonRpcResponse::decode(body).unwrap();
        assert_eq!(response.id, Some(3));
        assert!(response.testnet);
        assert_eq!(response.result, Some(json!({"x": 1})));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_decode_null_result_is_present() {
        let response = JsonRpcResponse::decode(br#"{"id":1,"result":null}"#).unwrap();
        assert_eq!(response.result, Some(Value::Null));
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = br#"{"id":4,"error":{"code":13009,"message":"invalid_token"}}"#;
        let response = JsonRpcResponse::decode(body).unwrap();
        assert!(response.is_auth_error());
        assert_eq!(response.error.unwrap().message, "invalid_token");
    }

    #[test]
    fn test_decode_rejects_ambiguous_and_empty() {
        let both = br#"{"result":1,"error":{"code":1,"message":"x"}}"#;
        assert!(matches!(
            JsonRpcResponse::decode(both),
            Err(DecodeError::Ambiguous)
        ));
        assert!(matches!(
            JsonRpcResponse::decode(br#"{"id":1}"#),
            Err(DecodeError::Empty)
        ));
        assert!(matches!(
            JsonRpcResponse::decode(b"<html>"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_into_outcome() {
        let ok = JsonRpcResponse::decode(br#"{"result":[1,2]}"#).unwrap();
        let outcome: RpcOutcome<Vec<u32>> = ok.into_outcome().unwrap();
        assert_eq!(outcome, RpcOutcome::Success(vec![1, 2]));

        let rejected = JsonRpcResponse::decode(
            br#"{"error":{"code":10009,"message":"not_enough_funds"}}"#,
        )
        .unwrap();
        let outcome: RpcOutcome<Vec<u32>> = rejected.into_outcome().unwrap();
        assert_eq!(outcome.rejection().map(|e| e.code), Some(10009));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_into_outcome_shape_mismatch_is_protocol_error() {
        let response = JsonRpcResponse::decode(br#"{"result":"text"}"#).unwrap();
        let err = response.into_outcome::<Vec<u32>>().unwrap_err();
        assert!(matches!(err, SdkError::Protocol(_)));
    }
}
