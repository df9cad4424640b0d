//! Route template matching logic.
//!
//! # Responsibilities
//! - Compile include/exclude regular expressions once, at startup
//! - Test a route template against one group definition
//!
//! # Design Decisions
//! - "Contains" semantics (`Regex::is_match`), anchors are up to the pattern author
//! - Include patterns combine with AND, exclude patterns with NOR
//! - Empty pattern list = vacuously satisfied

use regex::Regex;
use thiserror::Error;

use crate::config::GroupConfig;

/// A pattern in a group definition failed to compile.
#[derive(Debug, Error)]
#[error("group '{group}': invalid pattern '{pattern}': {source}")]
pub struct PatternError {
    pub group: String,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Trait for matching route templates against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the template satisfies this condition.
    fn matches(&self, template: &str) -> bool;
}

/// A compiled group definition.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    name: String,
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PatternMatcher {
    /// Compile a group definition. The first pattern that fails aborts compilation.
    pub fn compile(config: &GroupConfig) -> Result<Self, PatternError> {
        let compile_all = |patterns: &[String]| -> Result<Vec<Regex>, PatternError> {
            patterns
                .iter()
                .map(|pattern| {
                    Regex::new(pattern).map_err(|source| PatternError {
                        group: config.name.clone(),
                        pattern: pattern.clone(),
                        source,
                    })
                })
                .collect()
        };

        Ok(Self {
            name: config.name.clone(),
            include: compile_all(config.patterns.as_slice())?,
            exclude: compile_all(config.not_patterns.as_slice())?,
        })
    }

    /// Group name emitted when this matcher qualifies.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, template: &str) -> bool {
        self.include.iter().all(|re| re.is_match(template))
            && !self.exclude.iter().any(|re| re.is_match(template))
    }
}
