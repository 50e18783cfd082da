//! Order book sub-client: public depth snapshots, no authentication.

use crate::client::DeribitClient;
use crate::domain::orderbook::wire::{GetOrderBookParams, OrderBookResponse};
use crate::domain::orderbook::{OrderBook, ORDER_BOOK_DEPTH};
use crate::error::SdkError;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::rpc::RpcOutcome;

/// Sub-client for order book queries.
pub struct Orderbooks<'a, T = ReqwestTransport> {
    pub(crate) client: &'a DeribitClient<T>,
}

impl<'a, T: Transport> Orderbooks<'a, T> {
    /// Top [`ORDER_BOOK_DEPTH`] levels per side. Error envelopes are returned
    /// as [`RpcOutcome::Rejected`] unchanged.
    pub async fn get(&self, instrument: &str) -> Result<RpcOutcome<OrderBook>, SdkError> {
        self.get_with_depth(instrument, ORDER_BOOK_DEPTH).await
    }

    pub async fn get_with_depth(
        &self,
        instrument: &str,
        depth: u32,
    ) -> Result<RpcOutcome<OrderBook>, SdkError> {
        let params = GetOrderBookParams {
            instrument_name: instrument,
            depth,
        };
        let outcome = self
            .client
            .http
            .dispatch("public/get_order_book", &params)
            .await?
            .into_outcome::<OrderBookResponse>()?;
        Ok(outcome.map(OrderBook::from))
    }
}
