//! Wire types for `private/buy`, `private/sell`, `private/edit` and `private/cancel`.

use crate::domain::order::OrderType;
use crate::shared::{serde_util, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Params ──────────────────────────────────────────────────────────────────

/// Params of `private/buy` / `private/sell`.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderParams<'a> {
    pub instrument_name: &'a str,
    pub amount: f64,
    pub price: f64,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub post_only: bool,
}

impl<'a> PlaceOrderParams<'a> {
    /// Limit order that only ever adds liquidity.
    pub fn limit_post_only(instrument_name: &'a str, amount: f64, price: f64) -> Self {
        Self {
            instrument_name,
            amount,
            price,
            order_type: OrderType::Limit,
            post_only: true,
        }
    }
}

/// Params of `private/edit`.
#[derive(Debug, Clone, Serialize)]
pub struct EditOrderParams<'a> {
    pub order_id: &'a str,
    pub price: f64,
    pub amount: f64,
}

/// Params of `private/cancel`.
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderParams<'a> {
    pub order_id: &'a str,
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// Result of place and edit calls.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub order: WireOrder,
    #[serde(default)]
    pub trades: Vec<WireTrade>,
}

/// Order object as reported by the server. Also the result of `private/cancel`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireOrder {
    pub order_id: String,
    pub instrument_name: String,
    pub direction: Side,
    pub amount: f64,
    #[serde(default, with = "serde_util::price_or_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub filled_amount: f64,
    #[serde(default)]
    pub average_price: Option<f64>,
    pub order_state: super::OrderState,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub post_only: bool,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(with = "serde_util::timestamp_ms")]
    pub creation_timestamp: DateTime<Utc>,
    #[serde(with = "serde_util::timestamp_ms")]
    pub last_update_timestamp: DateTime<Utc>,
}

/// Fill reported alongside a placed or edited order.
#[derive(Debug, Clone, Deserialize)]
pub struct WireTrade {
    pub trade_id: String,
    pub order_id: String,
    pub direction: Side,
    pub price: f64,
    pub amount: f64,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub fee_currency: Option<String>,
    #[serde(with = "serde_util::timestamp_ms")]
    pub timestamp: DateTime<Utc>,
}
