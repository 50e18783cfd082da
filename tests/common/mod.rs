//! Scripted JSON-RPC transport shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use deribit_sdk::client::DeribitClient;
use deribit_sdk::error::HttpError;
use deribit_sdk::http::{HttpResponse, Transport};
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://mock.deribit/api/v2";

pub type Reply = Result<HttpResponse, HttpError>;

/// One request as seen on the wire.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub id: u64,
    pub method: String,
    pub authorization: Option<String>,
    pub params: Value,
}

type Responder = Box<dyn Fn(&Recorded, usize) -> Reply + Send + Sync>;

/// Records every request and answers through a closure.
///
/// The closure receives the request and how many earlier requests used the
/// same method, so scripts can change behavior on later attempts.
pub struct MockTransport {
    responder: Responder,
    requests: Mutex<Vec<Recorded>>,
    auth_delay: Duration,
}

impl MockTransport {
    pub fn new(responder: impl Fn(&Recorded, usize) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
            auth_delay: Duration::ZERO,
        }
    }

    /// Hold every `public/auth` reply for `delay`.
    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.auth_delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.method).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

impl Transport for MockTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, HttpError> {
        let envelope: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope["jsonrpc"], "2.0");

        let recorded = Recorded {
            url: url.to_string(),
            id: envelope["id"].as_u64().unwrap(),
            method: envelope["method"].as_str().unwrap().to_string(),
            authorization: headers
                .iter()
                .find(|(name, _)| *name == "Authorization")
                .map(|(_, value)| value.clone()),
            params: envelope["params"].clone(),
        };

        if recorded.method == "public/auth" && !self.auth_delay.is_zero() {
            tokio::time::sleep(self.auth_delay).await;
        }

        let nth = {
            let mut requests = self.requests.lock().unwrap();
            let nth = requests
                .iter()
                .filter(|r| r.method == recorded.method)
                .count();
            requests.push(recorded.clone());
            nth
        };
        (self.responder)(&recorded, nth)
    }
}

// ─── Client ──────────────────────────────────────────────────────────────────

pub fn client(transport: MockTransport) -> DeribitClient<MockTransport> {
    DeribitClient::builder()
        .base_url(BASE_URL)
        .credentials("test-id", "test-secret")
        .build_with_transport(transport)
        .unwrap()
}

// ─── Replies ─────────────────────────────────────────────────────────────────

pub fn reply(status: u16, body: Value) -> Reply {
    Ok(HttpResponse {
        status,
        body: serde_json::to_vec(&body).unwrap(),
    })
}

pub fn success(req: &Recorded, result: Value) -> Reply {
    reply(
        200,
        json!({
            "jsonrpc": "2.0",
            "id": req.id,
            "result": result,
            "testnet": true,
            "usIn": 1700000000000000u64,
            "usOut": 1700000000000150u64,
            "usDiff": 150
        }),
    )
}

pub fn failure(req: &Recorded, code: i64, message: &str) -> Reply {
    reply(
        400,
        json!({
            "jsonrpc": "2.0",
            "id": req.id,
            "error": {"code": code, "message": message},
            "testnet": true
        }),
    )
}

pub fn session_expired(req: &Recorded) -> Reply {
    failure(req, 13009, "unauthorized")
}

/// `public/auth` result whose tokens carry the attempt number.
pub fn auth_result(nth: usize) -> Value {
    json!({
        "access_token": format!("access-{nth}"),
        "refresh_token": format!("refresh-{nth}"),
        "expires_in": 900,
        "scope": "connection mainaccount",
        "token_type": "bearer"
    })
}

pub fn order_json(order_id: &str, direction: &str, amount: f64, price: f64) -> Value {
    json!({
        "order_id": order_id,
        "instrument_name": "BTC-PERPETUAL",
        "direction": direction,
        "amount": amount,
        "price": price,
        "filled_amount": 0.0,
        "average_price": 0.0,
        "order_state": "open",
        "order_type": "limit",
        "post_only": true,
        "label": "",
        "creation_timestamp": 1700000000000u64,
        "last_update_timestamp": 1700000000000u64
    })
}

pub fn order_result(order_id: &str, direction: &str, amount: f64, price: f64) -> Value {
    json!({
        "order": order_json(order_id, direction, amount, price),
        "trades": []
    })
}

pub fn book_json(instrument: &str) -> Value {
    json!({
        "instrument_name": instrument,
        "bids": [[25000.0, 120.0], [24999.5, 40.0]],
        "asks": [[25000.5, 30.0], [25001.0, 10.0]],
        "best_bid_price": 25000.0,
        "best_bid_amount": 120.0,
        "best_ask_price": 25000.5,
        "best_ask_amount": 30.0,
        "mark_price": 25000.2,
        "index_price": 24998.7,
        "last_price": 25000.0,
        "state": "open",
        "change_id": 1001,
        "timestamp": 1700000000000u64
    })
}

pub fn positions_json() -> Value {
    json!([{
        "instrument_name": "BTC-PERPETUAL",
        "direction": "buy",
        "size": 20.0,
        "size_currency": 0.0008,
        "average_price": 25000.0,
        "mark_price": 25010.0,
        "index_price": 25005.0,
        "floating_profit_loss": 0.0000003,
        "realized_profit_loss": 0.0,
        "total_profit_loss": 0.0000003,
        "leverage": 50,
        "kind": "future"
    }])
}

/// Default script: auth succeeds, every other method returns `result`.
pub fn answer_with(result: Value) -> impl Fn(&Recorded, usize) -> Reply + Send + Sync + 'static {
    move |req, nth| match req.method.as_str() {
        "public/auth" => success(req, auth_result(nth)),
        _ => success(req, result.clone()),
    }
}
