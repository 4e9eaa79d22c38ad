//! Pattern compilation and owned match captures.
//!
//! Patterns are compiled once, at registration time, with the linear-time
//! `regex` engine, so arbitrary user-controlled dispatch keys (message text,
//! callback data) cannot trigger pathological backtracking.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Errors produced while registering handlers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The supplied pattern failed to compile.
    #[error("invalid handler pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as passed to the registration call.
        pattern: String,
        /// The underlying compile error.
        source: regex::Error,
    },
}

/// Compiles a command pattern: anchored to start-of-text, case-insensitive.
pub(crate) fn compile_command(pattern: &str) -> Result<Regex, RegistryError> {
    RegexBuilder::new(&format!("^(?:{pattern})"))
        .case_insensitive(true)
        .build()
        .map_err(|source| RegistryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compiles an unanchored search pattern, as used by every non-command
/// category.
pub(crate) fn compile_search(pattern: &str) -> Result<Regex, RegistryError> {
    Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Captured groups of a successful pattern match, detached from the dispatch
/// key so they can travel into a `'static` handler future.
///
/// Group 0 is the whole match; groups that did not participate are `None`.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    groups: Vec<Option<String>>,
}

impl PatternMatch {
    /// Runs `regex` against `key` and collects the captures, if any.
    pub(crate) fn capture(regex: &Regex, key: &str) -> Option<Self> {
        let caps = regex.captures(key)?;
        let groups = caps
            .iter()
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();
        Some(Self { groups })
    }

    /// Returns capture group `index`, with group 0 being the whole match.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index)?.as_deref()
    }

    /// Number of groups, including the whole match.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the match carries no groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_pattern_is_anchored() {
        let re = compile_command(r"/echo (.+)").unwrap();
        let m = PatternMatch::capture(&re, "/echo foo").unwrap();
        assert_eq!(m.group(1), Some("foo"));
        assert!(PatternMatch::capture(&re, "say /echo foo").is_none());
    }

    #[test]
    fn command_pattern_is_case_insensitive() {
        let re = compile_command(r"/start").unwrap();
        assert!(PatternMatch::capture(&re, "/START").is_some());
    }

    #[test]
    fn search_pattern_is_unanchored() {
        let re = compile_search(r"query-(\w+)").unwrap();
        let m = PatternMatch::capture(&re, "some query-foo here").unwrap();
        assert_eq!(m.group(1), Some("foo"));
        assert_eq!(m.group(0), Some("query-foo"));
    }

    #[test]
    fn unmatched_optional_group_is_none() {
        let re = compile_search(r"a(b)?c").unwrap();
        let m = PatternMatch::capture(&re, "ac").unwrap();
        assert_eq!(m.group(1), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = compile_search(r"(unclosed").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { .. }));
    }
}
