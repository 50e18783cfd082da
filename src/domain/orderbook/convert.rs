//! Conversions: wire order book → [`OrderBook`].

use super::wire::OrderBookResponse;
use super::{BookLevel, OrderBook};

fn levels(raw: Vec<[f64; 2]>) -> Vec<BookLevel> {
    raw.into_iter()
        .map(|[price, amount]| BookLevel { price, amount })
        .collect()
}

impl From<OrderBookResponse> for OrderBook {
    fn from(resp: OrderBookResponse) -> Self {
        OrderBook {
            instrument_name: resp.instrument_name,
            bids: levels(resp.bids),
            asks: levels(resp.asks),
            mark_price: resp.mark_price,
            index_price: resp.index_price,
            last_price: resp.last_price,
            state: resp.state,
            change_id: resp.change_id,
            timestamp: resp.timestamp,
        }
    }
}
