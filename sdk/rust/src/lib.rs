//! Client for the CORS relay.

pub mod client;

pub use client::{RelayCall, RelayClient, RelayReply};
