//! Route template classification into groups.
//!
//! # Responsibilities
//! - Store compiled group definitions in configured order
//! - Resolve a route template to a single group name, or none
//!
//! # Design Decisions
//! - Immutable after construction (shared across tasks without locks)
//! - Every definition is evaluated; the LAST qualifying one wins
//! - An empty-named definition is allowed; when it qualifies last, no group is reported

use crate::config::GroupConfig;
use crate::routing::matcher::{Matcher, PatternError, PatternMatcher};

/// Ordered list of compiled group definitions.
#[derive(Debug, Clone, Default)]
pub struct GroupClassifier {
    groups: Vec<PatternMatcher>,
}

impl GroupClassifier {
    /// Compile every group definition. Any malformed pattern fails the whole list.
    pub fn new(configs: &[GroupConfig]) -> Result<Self, PatternError> {
        let groups = configs
            .iter()
            .map(PatternMatcher::compile)
            .collect::<Result<Vec<_>, _>>()?;

        for (index, group) in groups.iter().enumerate() {
            if group.name().is_empty() {
                tracing::warn!(index, "Group has an empty name; paths it matches last report no group");
            }
        }
        tracing::debug!(groups = groups.len(), "Group classifier compiled");
        Ok(Self { groups })
    }

    /// Determine the group of a route template.
    pub fn classify(&self, template: &str) -> Option<&str> {
        // Invariant: after visiting groups[..i], `matched` holds the name of
        // the last qualifying group among them. No early return.
        let mut matched = None;
        for group in &self.groups {
            if group.matches(template) {
                matched = Some(group.name());
            }
        }
        matched.filter(|name| !name.is_empty())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
