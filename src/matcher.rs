//! Extraction of a repository name from a module's free-text source field.
use anyhow::{anyhow, Result};
use regex::Regex;
use std::fmt;

/// The source field carries no `github.com[/:]<org>/<name>` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFailure;

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("source does not reference a GitHub repository in the organization")
    }
}

impl std::error::Error for MatchFailure {}

/// Finds the first `github.com[/:]<org>/<name>` reference in a source string.
///
/// Both HTTPS (`github.com/org/name`) and SSH (`github.com:org/name`) forms are
/// accepted. `<name>` is the longest run of word characters and hyphens, so a
/// trailing `.git` or path segment is cut off. Matching is case-sensitive.
pub struct SourceMatcher {
    pattern: Regex,
}

impl SourceMatcher {
    pub fn new(org: &str) -> Result<Self> {
        let pattern = format!(r"github\.com[/:]{}/([\w-]*)", regex::escape(org));
        let pattern = Regex::new(&pattern)
            .map_err(|err| anyhow!("invalid source pattern for org {org:?}: {err}"))?;
        Ok(Self { pattern })
    }

    /// Return the repository name of the first reference, if any.
    ///
    /// Only the first reference counts; an empty name there is a failure even
    /// when a later reference would have matched.
    pub fn extract<'s>(&self, source: &'s str) -> Result<&'s str, MatchFailure> {
        let name = self
            .pattern
            .captures(source)
            .and_then(|captures| captures.get(1))
            .map(|name| name.as_str())
            .ok_or(MatchFailure)?;
        if name.is_empty() {
            return Err(MatchFailure);
        }
        Ok(name)
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
