//! Conversions: wire order results → order domain types.

use super::wire::{OrderResponse, WireOrder, WireTrade};
use super::{Fill, Order, OrderResult};

impl From<WireOrder> for Order {
    fn from(o: WireOrder) -> Self {
        Order {
            order_id: o.order_id,
            instrument_name: o.instrument_name,
            side: o.direction,
            amount: o.amount,
            price: o.price,
            filled_amount: o.filled_amount,
            average_price: o.average_price,
            state: o.order_state,
            post_only: o.post_only,
            label: o.label,
            created_at: o.creation_timestamp,
            updated_at: o.last_update_timestamp,
        }
    }
}

impl From<WireTrade> for Fill {
    fn from(t: WireTrade) -> Self {
        Fill {
            trade_id: t.trade_id,
            order_id: t.order_id,
            side: t.direction,
            price: t.price,
            amount: t.amount,
            fee: t.fee,
            fee_currency: t.fee_currency,
            timestamp: t.timestamp,
        }
    }
}

impl From<OrderResponse> for OrderResult {
    fn from(resp: OrderResponse) -> Self {
        OrderResult {
            order: resp.order.into(),
            fills: resp.trades.into_iter().map(Fill::from).collect(),
        }
    }
}
