//! Position domain: open positions per currency.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};

/// Net direction of a position. `Zero` for a flat position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
    Zero,
}

/// A position in one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub instrument_name: String,
    pub direction: Direction,
    /// Signed size: negative for short positions.
    pub size: f64,
    pub size_currency: Option<f64>,
    pub average_price: f64,
    pub mark_price: Option<f64>,
    pub index_price: Option<f64>,
    pub floating_profit_loss: Option<f64>,
    pub realized_profit_loss: Option<f64>,
    pub total_profit_loss: Option<f64>,
    pub leverage: Option<u32>,
    pub kind: Option<String>,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.direction == Direction::Zero || self.size == 0.0
    }
}

impl From<wire::PositionResponse> for Position {
    fn from(p: wire::PositionResponse) -> Self {
        Position {
            instrument_name: p.instrument_name,
            direction: p.direction,
            size: p.size,
            size_currency: p.size_currency,
            average_price: p.average_price,
            mark_price: p.mark_price,
            index_price: p.index_price,
            floating_profit_loss: p.floating_profit_loss,
            realized_profit_loss: p.realized_profit_loss,
            total_profit_loss: p.total_profit_loss,
            leverage: p.leverage,
            kind: p.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_from_wire() {
        let raw: Vec<wire::PositionResponse> = serde_json::from_value(json!([
            {
                "instrument_name": "BTC-PERPETUAL",
                "direction": "sell",
                "size": -50.0,
                "size_currency": -0.002,
                "average_price": 25100.0,
                "mark_price": 25000.0,
                "floating_profit_loss": 0.00001,
                "total_profit_loss": 0.00002,
                "leverage": 50,
                "kind": "future"
            },
            {
                "instrument_name": "BTC-29DEC23",
                "direction": "zero",
                "size": 0.0
            }
        ]))
        .unwrap();

        let positions: Vec<Position> = raw.into_iter().map(Position::from).collect();
        assert_eq!(positions[0].direction, Direction::Sell);
        assert_eq!(positions[0].size, -50.0);
        assert_eq!(positions[0].leverage, Some(50));
        assert!(!positions[0].is_flat());
        assert!(positions[1].is_flat());
    }
}
