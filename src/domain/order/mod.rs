//! Order domain: orders, fills, amount validation.

pub mod client;
mod convert;
pub mod validate;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::shared::Side;
pub use validate::{validate_amount, AmountValidator, DEFAULT_CONTRACT_SIZE};

// ─── OrderType ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Limit,
    Market,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OrderType::Limit => write!(f, "limit"),
            OrderType::Market => write!(f, "market"),
        }
    }
}

// ─── OrderState ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    Open,
    Filled,
    Rejected,
    Cancelled,
    Untriggered,
    Triggered,
    #[serde(other)]
    Unknown,
}

impl OrderState {
    /// Whether the order can still trade or be edited.
    pub fn is_live(&self) -> bool {
        matches!(self, OrderState::Open | OrderState::Untriggered)
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// An order as last reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub instrument_name: String,
    pub side: Side,
    pub amount: f64,
    /// `None` for market orders.
    pub price: Option<f64>,
    pub filled_amount: f64,
    pub average_price: Option<f64>,
    pub state: OrderState,
    pub post_only: bool,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn remaining_amount(&self) -> f64 {
        (self.amount - self.filled_amount).max(0.0)
    }
}

/// A trade executed against one of our orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub trade_id: String,
    pub order_id: String,
    pub side: Side,
    pub price: f64,
    pub amount: f64,
    pub fee: Option<f64>,
    pub fee_currency: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Result of placing or editing an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order: Order,
    pub fills: Vec<Fill>,
}
