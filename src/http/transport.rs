//! Transport seam: a single HTTP POST capability.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::HttpError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one POST and returns status + body, or a transport failure.
///
/// Implementations must bound each call with a timeout and must not retry.
pub trait Transport: Send + Sync {
    fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: Vec<u8>,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: Vec<u8>,
    ) -> Result<HttpResponse, HttpError> {
        let mut req = self.client.post(url);
        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }

        let resp = req.body(body).send().await.map_err(map_reqwest)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(map_reqwest)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}
