//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Compile groups → Start publisher → Serve
//!
//! Shutdown:
//!     Signal received → Stop accepting → Close queue → Drain publisher → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The publisher stops after the server so in-flight requests are still measured

pub mod signals;

pub use signals::shutdown_signal;
