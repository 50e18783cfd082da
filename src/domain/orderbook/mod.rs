//! Order book domain: depth snapshot for one instrument.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Depth requested by [`client::Orderbooks::get`].
pub const ORDER_BOOK_DEPTH: u32 = 5;

/// One price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: f64,
    pub amount: f64,
}

/// Order book snapshot. Bids are best-first (descending), asks best-first
/// (ascending), as the server sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub instrument_name: String,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    pub mark_price: Option<f64>,
    pub index_price: Option<f64>,
    pub last_price: Option<f64>,
    pub state: Option<String>,
    pub change_id: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<BookLevel> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<BookLevel> {
        self.asks.first().copied()
    }

    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    pub fn mid(&self) -> Option<f64> {
        Some((self.best_ask()?.price + self.best_bid()?.price) / 2.0)
    }
}
