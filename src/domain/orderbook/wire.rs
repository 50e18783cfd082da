//! Wire types for `public/get_order_book`.

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Params of `public/get_order_book`.
#[derive(Debug, Clone, Serialize)]
pub struct GetOrderBookParams<'a> {
    pub instrument_name: &'a str,
    pub depth: u32,
}

/// Result of `public/get_order_book`.
///
/// Levels arrive as `[price, amount]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookResponse {
    pub instrument_name: String,
    #[serde(default)]
    pub bids: Vec<[f64; 2]>,
    #[serde(default)]
    pub asks: Vec<[f64; 2]>,
    #[serde(default)]
    pub best_bid_price: Option<f64>,
    #[serde(default)]
    pub best_bid_amount: Option<f64>,
    #[serde(default)]
    pub best_ask_price: Option<f64>,
    #[serde(default)]
    pub best_ask_amount: Option<f64>,
    #[serde(default)]
    pub mark_price: Option<f64>,
    #[serde(default)]
    pub index_price: Option<f64>,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub change_id: Option<u64>,
    #[serde(with = "serde_util::timestamp_ms")]
    pub timestamp: DateTime<Utc>,
}
