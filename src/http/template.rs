//! Route template resolution.
//!
//! # Responsibilities
//! - Read the template the router matched (`MatchedPath`)
//! - Reject templates that would not bound metric cardinality
//!
//! # Design Decisions
//! - Raw URIs are never used: no template, no measurement
//! - Fallback-served requests carry no `MatchedPath` and are unresolvable
//! - A 405 still carries the path's `MatchedPath` but dispatched no handler, so it is skipped
//! - Catch-all templates (`{*rest}`, e.g. static asset mounts) are optionally skipped

use axum::extract::MatchedPath;
use axum::http::StatusCode;

/// Resolves the canonical template of a routed request.
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver {
    skip_catch_all: bool,
}

impl TemplateResolver {
    pub fn new(skip_catch_all: bool) -> Self {
        Self { skip_catch_all }
    }

    /// The route template, or `None` when the request must not be measured.
    pub fn resolve(&self, matched: Option<&MatchedPath>, status: StatusCode) -> Option<String> {
        if status == StatusCode::METHOD_NOT_ALLOWED {
            return None;
        }
        let template = matched?.as_str();
        if self.skip_catch_all && is_catch_all(template) {
            return None;
        }
        Some(template.to_string())
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

fn is_catch_all(template: &str) -> bool {
    template.split('/').any(|segment| segment.starts_with("{*"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_all_detection() {
        assert!(is_catch_all("/assets/{*path}"));
        assert!(is_catch_all("/{*rest}"));
        assert!(!is_catch_all("/users/{id}"));
        assert!(!is_catch_all("/"));
    }

    #[test]
    fn test_missing_match() {
        assert_eq!(TemplateResolver::default().resolve(None, StatusCode::OK), None);
        assert_eq!(TemplateResolver::new(false).resolve(None, StatusCode::NOT_FOUND), None);
    }
}
