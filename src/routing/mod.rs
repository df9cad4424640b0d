//! Route grouping subsystem.
//!
//! # Data Flow
//! ```text
//! Group compilation (at startup):
//!     GroupConfig[]
//!     → matcher.rs (compile include/exclude regexes)
//!     → classifier.rs (freeze as ordered, immutable list)
//!
//! Per measurement (publisher task):
//!     route template
//!     → classifier.rs (evaluate every group)
//!     → Return: last qualifying group name, or none
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at startup; a bad pattern fails construction
//! - Deterministic: same template always yields the same group
//! - Last match wins (configuration order matters)

pub mod classifier;
pub mod matcher;

pub use classifier::GroupClassifier;
pub use matcher::{Matcher, PatternError, PatternMatcher};
