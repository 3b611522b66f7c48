//! HTTP hosting for the relay.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, body limit)
//!     → request.rs (request ID generation and lookup)
//!     → relay::relay (validate, forward, classify)
//!     → response.rs (JSON error bodies, upstream passthrough)
//!     → CORS + Content-Type headers stamped on the way out
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use response::{passthrough, ErrorBody};
pub use server::{AppState, HttpServer};
