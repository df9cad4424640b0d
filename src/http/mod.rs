//! HTTP instrumentation subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → recorder.rs (start clock, dispatch through the wrapped router)
//!     → template.rs (route template from the router's match)
//!     → publisher queue (one Measurement per routed request)
//!     → response returned unchanged
//! ```

pub mod recorder;
pub mod template;

pub use recorder::{instrument, record_latency, LatencyRecorder};
pub use template::TemplateResolver;
