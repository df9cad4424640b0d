//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! embedding application (code) or TOML document
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, pattern compilation)
//!     → CollectorConfig (validated, immutable)
//!     → consumed once when the publisher and recorder are built
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::CollectorConfig;
pub use schema::GroupConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::OutputShape;
pub use schema::OverflowPolicy;
pub use schema::QueueConfig;
pub use schema::RecorderConfig;
pub use schema::SinkConfig;
