//! HTTP layer: transport seam and the JSON-RPC dispatcher `DeribitHttp`.

pub mod client;
pub mod transport;

pub use client::DeribitHttp;
pub use transport::{HttpResponse, ReqwestTransport, Transport, DEFAULT_TIMEOUT};
