//! Positions sub-client.

use crate::client::DeribitClient;
use crate::domain::position::wire::{GetPositionsParams, PositionResponse};
use crate::domain::position::Position;
use crate::error::SdkError;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::rpc::RpcOutcome;

pub struct Positions<'a, T = ReqwestTransport> {
    pub(crate) client: &'a DeribitClient<T>,
}

impl<'a, T: Transport> Positions<'a, T> {
    /// All positions in `currency` (e.g. `"BTC"`).
    pub async fn get(&self, currency: &str) -> Result<RpcOutcome<Vec<Position>>, SdkError> {
        let params = GetPositionsParams { currency };
        let outcome = self
            .client
            .http
            .dispatch("private/get_positions", &params)
            .await?
            .into_outcome::<Vec<PositionResponse>>()?;
        Ok(outcome.map(|raw| raw.into_iter().map(Position::from).collect()))
    }
}
