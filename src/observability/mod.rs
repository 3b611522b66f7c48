//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler and middleware produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via `metrics`)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every handler log line
//! - Metric macros are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
