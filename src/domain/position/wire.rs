//! Wire types for `private/get_positions`.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Params of `private/get_positions`.
#[derive(Debug, Clone, Serialize)]
pub struct GetPositionsParams<'a> {
    pub currency: &'a str,
}

/// A single position entry from the result array.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionResponse {
    pub instrument_name: String,
    pub direction: Direction,
    pub size: f64,
    #[serde(default)]
    pub size_currency: Option<f64>,
    #[serde(default)]
    pub average_price: f64,
    #[serde(default)]
    pub mark_price: Option<f64>,
    #[serde(default)]
    pub index_price: Option<f64>,
    #[serde(default)]
    pub floating_profit_loss: Option<f64>,
    #[serde(default)]
    pub realized_profit_loss: Option<f64>,
    #[serde(default)]
    pub total_profit_loss: Option<f64>,
    #[serde(default)]
    pub leverage: Option<u32>,
    #[serde(default)]
    pub kind: Option<String>,
}
