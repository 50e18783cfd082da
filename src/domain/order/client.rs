//! Orders sub-client: place, modify, cancel.

use crate::client::{DeribitClient, RejectionPolicy};
use crate::domain::order::wire::{
    CancelOrderParams, EditOrderParams, OrderResponse, PlaceOrderParams, WireOrder,
};
use crate::domain::order::{Order, OrderResult, Side};
use crate::error::SdkError;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::rpc::RpcOutcome;

pub struct Orders<'a, T = ReqwestTransport> {
    pub(crate) client: &'a DeribitClient<T>,
}

impl<'a, T: Transport> Orders<'a, T> {
    /// Place a post-only limit order.
    ///
    /// The amount is validated locally first; an invalid amount fails with
    /// [`SdkError::InvalidAmount`] without contacting the server. A business
    /// rejection is handled per the client's [`RejectionPolicy`]. On success
    /// the order becomes the client's current order.
    pub async fn place(
        &self,
        instrument: &str,
        side: Side,
        amount: f64,
        price: f64,
    ) -> Result<RpcOutcome<OrderResult>, SdkError> {
        let amount = self.client.validator.validate(amount)?;
        let params = PlaceOrderParams::limit_post_only(instrument, amount, price);

        let outcome = self
            .client
            .http
            .dispatch(side.method(), &params)
            .await?
            .into_outcome::<OrderResponse>()?
            .map(OrderResult::from);

        match outcome {
            RpcOutcome::Success(result) => {
                tracing::info!(
                    instrument,
                    side = %side,
                    amount,
                    price,
                    order_id = %result.order.order_id,
                    "Order placed"
                );
                self.client
                    .set_current_order(Some(result.order.order_id.clone()))
                    .await;
                Ok(RpcOutcome::Success(result))
            }
            RpcOutcome::Rejected(error) => match self.client.rejection_policy {
                RejectionPolicy::Report => {
                    tracing::warn!(
                        instrument,
                        side = %side,
                        code = error.code,
                        message = %error.message,
                        "Order placement rejected"
                    );
                    Ok(RpcOutcome::Rejected(error))
                }
                RejectionPolicy::Propagate => Err(SdkError::Rejected(error)),
            },
        }
    }

    pub async fn buy(
        &self,
        instrument: &str,
        amount: f64,
        price: f64,
    ) -> Result<RpcOutcome<OrderResult>, SdkError> {
        self.place(instrument, Side::Buy, amount, price).await
    }

    pub async fn sell(
        &self,
        instrument: &str,
        amount: f64,
        price: f64,
    ) -> Result<RpcOutcome<OrderResult>, SdkError> {
        self.place(instrument, Side::Sell, amount, price).await
    }

    /// Change price and amount of an open order. The new amount is validated
    /// before dispatch.
    pub async fn modify(
        &self,
        order_id: &str,
        new_price: f64,
        new_amount: f64,
    ) -> Result<RpcOutcome<OrderResult>, SdkError> {
        let amount = self.client.validator.validate(new_amount)?;
        let params = EditOrderParams {
            order_id,
            price: new_price,
            amount,
        };

        let outcome = self
            .client
            .http
            .dispatch("private/edit", &params)
            .await?
            .into_outcome::<OrderResponse>()?;
        Ok(outcome.map(OrderResult::from))
    }

    pub async fn cancel(&self, order_id: &str) -> Result<RpcOutcome<Order>, SdkError> {
        let params = CancelOrderParams { order_id };

        let outcome = self
            .client
            .http
            .dispatch("private/cancel", &params)
            .await?
            .into_outcome::<WireOrder>()?
            .map(Order::from);

        if outcome.is_success() {
            self.client.clear_current_order_if(order_id).await;
        }
        Ok(outcome)
    }

    // ── Current order ────────────────────────────────────────────────────

    /// Id of the last order placed through this client, if not yet cancelled.
    pub async fn current(&self) -> Option<String> {
        self.client.current_order_id().await
    }

    pub async fn modify_current(
        &self,
        new_price: f64,
        new_amount: f64,
    ) -> Result<RpcOutcome<OrderResult>, SdkError> {
        let order_id = self.current().await.ok_or(SdkError::NoCurrentOrder)?;
        self.modify(&order_id, new_price, new_amount).await
    }

    pub async fn cancel_current(&self) -> Result<RpcOutcome<Order>, SdkError> {
        let order_id = self.current().await.ok_or(SdkError::NoCurrentOrder)?;
        self.cancel(&order_id).await
    }
}
