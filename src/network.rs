//! Network URL constants for the Deribit SDK.

/// Production JSON-RPC root. Methods are appended as `<root>/<method>`.
pub const DEFAULT_API_URL: &str = "https://www.deribit.com/api/v2";

/// Testnet JSON-RPC root.
pub const TESTNET_API_URL: &str = "https://test.deribit.com/api/v2";
