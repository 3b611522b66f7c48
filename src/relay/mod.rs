//! The relay itself.
//!
//! # Data Flow
//! ```text
//! inbound method + body
//!     → handler.rs (method gate, body limit)
//!     → payload.rs (parse JSON, shape-check url/headers/data)
//!     → upstream.rs (one POST to the target, classify outcome)
//!     → error.rs / http::response (translate to a JSON response)
//! ```
//!
//! Each stage either hands a value to the next or returns a `RelayError`;
//! nothing is retried and nothing outlives the request.

pub mod error;
pub mod handler;
pub mod payload;
pub mod upstream;

pub use error::RelayError;
pub use handler::relay;
pub use payload::RelayRequest;
pub use upstream::UpstreamClient;
