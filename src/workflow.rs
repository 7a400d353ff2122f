//! Audit workflows.
//!
//! Each workflow fetches its collections from the provider, runs the core over
//! the snapshot, and publishes the outputs. Only provider failures abort a run;
//! malformed records are logged and skipped.
use crate::aggregate::{aggregate, AuditResult};
use crate::config::AuditConfig;
use crate::index::RepositoryIndex;
use crate::matcher::SourceMatcher;
use crate::modules::{filter_module_repos, ModuleRepoLists};
use crate::provider::{
    DataProvider, OutputValue, MISSING_README_NOTE, MODULES, MODULE_REPOS_OUTPUT,
    REPORT_FINDINGS_OUTPUT, REPORT_OUTPUT, REPOSITORIES, UNSUPPORTED_MODULE_REPOS_OUTPUT,
    UNTIERED_MODULE_REPOS_OUTPUT,
};
use crate::reconcile::{reconcile_packages, PackageFindings};
use crate::records::{
    decode_collection, decode_package, decode_repository, module_name, MalformedRecord,
    RecordFailure,
};
use crate::report::{render_report, ReportUrls};
use anyhow::{Context, Result};
use serde::Serialize;

/// Machine-readable findings published alongside the text report.
#[derive(Debug, Serialize)]
struct FindingsDocument<'a> {
    findings: &'a AuditResult,
    skipped_repositories: &'a [RecordFailure],
    skipped_modules: &'a [RecordFailure],
}

/// Reconcile modules against repositories and publish the text report.
///
/// With `include_findings`, the buckets are also published as JSON.
pub fn run_report(
    provider: &mut dyn DataProvider,
    config: &AuditConfig,
    include_findings: bool,
) -> Result<AuditResult> {
    let raw_repositories = provider
        .get(REPOSITORIES)
        .context("fetch repositories collection")?;
    let raw_modules = provider.get(MODULES).context("fetch modules collection")?;
    let missing_readme_note = provider
        .get(MISSING_README_NOTE)
        .context("fetch missing_readme_note collection")?;

    let urls = ReportUrls::from_config(config);
    let repositories = decode_collection(
        REPOSITORIES,
        &raw_repositories,
        decode_repository,
        |name| urls.repository(name),
    );
    let packages = decode_collection(
        MODULES,
        &raw_modules,
        |value| decode_package(value, &config.org),
        |slug| urls.module(module_name(slug, &config.org)),
    );

    let matcher = SourceMatcher::new(&config.org)?;
    let index = RepositoryIndex::build(&repositories.records).with_malformed(
        repositories
            .failures
            .iter()
            .filter_map(|failure| failure.label.as_deref()),
    );
    if index.is_empty() {
        tracing::warn!("repository snapshot is empty; every module will fail to resolve");
    }
    tracing::debug!(repositories = index.len(), "repository index built");
    let findings = reconcile_packages(&packages.records, &index, &matcher);

    let mut skipped_modules = packages.failures.clone();
    for (position, entry) in findings.iter().enumerate() {
        if let PackageFindings::Skipped {
            package,
            repository,
        } = entry
        {
            skipped_modules.push(RecordFailure {
                index: packages.indices[position],
                label: Some(package.slug.clone()),
                url: Some(urls.module(&package.name)),
                error: MalformedRecord::MalformedRepository(repository.clone()),
            });
        }
    }
    skipped_modules.sort_by_key(|failure| failure.index);

    let result = aggregate(findings, missing_readme_note);

    tracing::info!(
        modules = packages.records.len(),
        skipped_modules = skipped_modules.len(),
        skipped_repositories = repositories.failures.len(),
        tag_module = result.tag_module.len(),
        badge_supported = result.badge_supported.len(),
        badge_unsupported = result.badge_unsupported.len(),
        source_field_problem = result.source_field_problem.len(),
        entries = result.entry_count(),
        "reconciliation complete"
    );

    let report = render_report(&result, &urls);
    provider.set(REPORT_OUTPUT, OutputValue::Text(report))?;
    if include_findings {
        let document = FindingsDocument {
            findings: &result,
            skipped_repositories: &repositories.failures,
            skipped_modules: &skipped_modules,
        };
        let value = serde_json::to_value(&document).context("serialize findings")?;
        provider.set(REPORT_FINDINGS_OUTPUT, OutputValue::Json(value))?;
    }
    Ok(result)
}

/// Filter module repositories and publish the three name lists.
pub fn run_module_repos(
    provider: &mut dyn DataProvider,
    config: &AuditConfig,
) -> Result<ModuleRepoLists> {
    let raw_repositories = provider
        .get(REPOSITORIES)
        .context("fetch repositories collection")?;
    let urls = ReportUrls::from_config(config);
    let repositories = decode_collection(
        REPOSITORIES,
        &raw_repositories,
        decode_repository,
        |name| urls.repository(name),
    );
    let lists = filter_module_repos(&repositories.records, config);

    tracing::info!(
        repositories = repositories.records.len(),
        skipped_repositories = repositories.failures.len(),
        modules = lists.modules.len(),
        unsupported = lists.unsupported.len(),
        untiered = lists.untiered.len(),
        "module repositories filtered"
    );

    provider.set(MODULE_REPOS_OUTPUT, OutputValue::Names(lists.modules.clone()))?;
    provider.set(
        UNSUPPORTED_MODULE_REPOS_OUTPUT,
        OutputValue::Names(lists.unsupported.clone()),
    )?;
    provider.set(
        UNTIERED_MODULE_REPOS_OUTPUT,
        OutputValue::Names(lists.untiered.clone()),
    )?;
    Ok(lists)
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
