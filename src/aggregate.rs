//! Merge per-module findings into the report buckets.
use crate::reconcile::{BadgeDefect, PackageFindings};
use crate::records::{PackageRecord, RepositoryRecord};
use serde::Serialize;
use serde_json::Value;

/// Defect buckets for one audit run, each in input order.
///
/// Buckets are multisets: a repository referenced by several modules lands in
/// `tag_module` once per module.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditResult {
    pub tag_module: Vec<RepositoryRecord>,
    /// Passed through from the provider untouched.
    pub missing_readme_note: Vec<Value>,
    pub badge_supported: Vec<PackageRecord>,
    pub badge_unsupported: Vec<PackageRecord>,
    pub source_field_problem: Vec<PackageRecord>,
}

impl AuditResult {
    /// Total entries across all buckets.
    pub fn entry_count(&self) -> usize {
        self.tag_module.len()
            + self.missing_readme_note.len()
            + self.badge_supported.len()
            + self.badge_unsupported.len()
            + self.source_field_problem.len()
    }
}

pub fn aggregate<'a, I>(findings: I, missing_readme_note: Vec<Value>) -> AuditResult
where
    I: IntoIterator<Item = PackageFindings<'a>>,
{
    let mut result = AuditResult {
        missing_readme_note,
        ..AuditResult::default()
    };
    for entry in findings {
        match entry {
            PackageFindings::Unresolved { package, .. } => {
                result.source_field_problem.push(package.clone());
            }
            PackageFindings::Skipped { .. } => {}
            PackageFindings::Resolved {
                package,
                repository,
                defects,
            } => {
                if defects.missing_module_topic {
                    result.tag_module.push(repository.clone());
                }
                match defects.badge {
                    Some(BadgeDefect::ShouldBadgeSupported) => {
                        result.badge_supported.push(package.clone());
                    }
                    Some(BadgeDefect::ShouldRemoveSupportedBadge) => {
                        result.badge_unsupported.push(package.clone());
                    }
                    None => {}
                }
            }
        }
    }
    result
}
