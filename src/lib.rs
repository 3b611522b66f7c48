//! CORS relay library.
//!
//! Accepts `POST { url, headers?, data? }`, forwards `data` as a JSON POST to
//! `url`, and hands the upstream's answer back with permissive CORS headers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
