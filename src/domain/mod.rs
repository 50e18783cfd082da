//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Domain types returned to callers
//! - `wire.rs`: Raw serde structs matching JSON-RPC params and results
//! - `convert.rs`: `From` conversions wire → domain (where non-trivial)
//! - `client.rs`: Sub-client issuing dispatcher calls

pub mod order;
pub mod orderbook;
pub mod position;
