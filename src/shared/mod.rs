//! Shared types used across domain modules.

pub mod serde_util;

use serde::{Deserialize, Serialize};

// ─── Side ────────────────────────────────────────────────────────────────────

/// Order side. Serializes as Deribit's `direction` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Private method that opens an order on this side.
    pub fn method(&self) -> &'static str {
        match self {
            Side::Buy => "private/buy",
            Side::Sell => "private/sell",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(format!("unknown side: {other}")),
        }
    }
}
