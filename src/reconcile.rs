//! Per-module reconciliation against the repository snapshot.
//!
//! Every module is examined on its own: resolve its repository through the
//! source matcher and index, then compare the two support signals. The result
//! is a `PackageFindings` value; nothing here mutates shared state, so the
//! aggregator decides how findings are merged.
use crate::index::RepositoryIndex;
use crate::matcher::{MatchFailure, SourceMatcher};
use crate::records::{PackageRecord, RepositoryRecord, MODULE_TOPIC, SUPPORTED_TOPIC};
use std::fmt;

/// Resolution of a module's source field to a repository record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    Resolved(&'a RepositoryRecord),
    Unresolved(UnresolvedReason),
    /// The source names a repository whose record failed to decode.
    MalformedRepository(String),
}

/// Why a module could not be linked to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The source field has no recognizable repository reference.
    Unparseable(MatchFailure),
    /// The referenced repository is not in the snapshot.
    UnknownRepository(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::Unparseable(failure) => write!(f, "{failure}"),
            UnresolvedReason::UnknownRepository(name) => {
                write!(f, "no repository named {name:?} in snapshot")
            }
        }
    }
}

/// Badge mismatch between the Forge endorsement and the repository topics.
///
/// At most one applies to a module, which the `Option` in `Defects` encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeDefect {
    /// Repository is tagged supported but the module is not endorsed.
    ShouldBadgeSupported,
    /// Module is endorsed supported but the repository is not tagged.
    ShouldRemoveSupportedBadge,
}

/// Defects detected on a resolved module/repository pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Defects {
    pub missing_module_topic: bool,
    pub badge: Option<BadgeDefect>,
}

/// Everything learned about one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageFindings<'a> {
    Resolved {
        package: &'a PackageRecord,
        repository: &'a RepositoryRecord,
        defects: Defects,
    },
    Unresolved {
        package: &'a PackageRecord,
        reason: UnresolvedReason,
    },
    /// Not checked; contributes to no bucket.
    Skipped {
        package: &'a PackageRecord,
        repository: String,
    },
}

impl<'a> PackageFindings<'a> {
    pub fn package(&self) -> &'a PackageRecord {
        match self {
            PackageFindings::Resolved { package, .. }
            | PackageFindings::Unresolved { package, .. }
            | PackageFindings::Skipped { package, .. } => package,
        }
    }
}

/// Resolve a module to its repository.
pub fn reconcile<'a>(
    package: &PackageRecord,
    index: &RepositoryIndex<'a>,
    matcher: &SourceMatcher,
) -> Outcome<'a> {
    let name = match matcher.extract(&package.source) {
        Ok(name) => name,
        Err(failure) => return Outcome::Unresolved(UnresolvedReason::Unparseable(failure)),
    };
    match index.lookup(name) {
        Some(repository) => Outcome::Resolved(repository),
        None if index.is_malformed(name) => Outcome::MalformedRepository(name.to_string()),
        None => Outcome::Unresolved(UnresolvedReason::UnknownRepository(name.to_string())),
    }
}

/// Evaluate the defect predicates for a resolved pair.
pub fn evaluate_defects(package: &PackageRecord, repository: &RepositoryRecord) -> Defects {
    let repo_supported = repository.has_topic(SUPPORTED_TOPIC);
    let package_supported = package.is_endorsed_supported();
    let badge = match (repo_supported, package_supported) {
        (true, false) => Some(BadgeDefect::ShouldBadgeSupported),
        (false, true) => Some(BadgeDefect::ShouldRemoveSupportedBadge),
        _ => None,
    };
    Defects {
        missing_module_topic: !repository.has_topic(MODULE_TOPIC),
        badge,
    }
}

/// Resolve one module and, when resolved, evaluate its defects.
pub fn examine_package<'a>(
    package: &'a PackageRecord,
    index: &RepositoryIndex<'a>,
    matcher: &SourceMatcher,
) -> PackageFindings<'a> {
    match reconcile(package, index, matcher) {
        Outcome::Resolved(repository) => PackageFindings::Resolved {
            package,
            repository,
            defects: evaluate_defects(package, repository),
        },
        Outcome::Unresolved(reason) => PackageFindings::Unresolved { package, reason },
        Outcome::MalformedRepository(repository) => {
            PackageFindings::Skipped { package, repository }
        }
    }
}

/// Examine every module in input order.
pub fn reconcile_packages<'a>(
    packages: &'a [PackageRecord],
    index: &RepositoryIndex<'a>,
    matcher: &SourceMatcher,
) -> Vec<PackageFindings<'a>> {
    packages
        .iter()
        .map(|package| {
            let findings = examine_package(package, index, matcher);
            match &findings {
                PackageFindings::Unresolved { reason, .. } => {
                    tracing::debug!(
                        slug = %package.slug,
                        source = %package.source,
                        reason = %reason,
                        "module source did not resolve"
                    );
                }
                PackageFindings::Skipped { repository, .. } => {
                    tracing::warn!(
                        slug = %package.slug,
                        repository = %repository,
                        "skipping module whose repository record is malformed"
                    );
                }
                PackageFindings::Resolved { .. } => {}
            }
            findings
        })
        .collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
