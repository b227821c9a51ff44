//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request path and store produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached by tower-http and shows up in the trace spans
//! - Metric updates are cheap and are no-ops when no recorder is installed

pub mod logging;
pub mod metrics;
