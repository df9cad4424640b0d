//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! recorder, queue and publisher produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms about the collector itself)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Dropped and failed measurements are counted, never surfaced to clients

pub mod logging;
pub mod metrics;
