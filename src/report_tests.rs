use super::*;
use crate::config::default_config;
use crate::records::{PackageRecord, RepositoryRecord};
use serde_json::json;

fn urls() -> ReportUrls {
    ReportUrls::from_config(&default_config())
}

fn repo(name: &str) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        topics: Default::default(),
    }
}

fn package(name: &str) -> PackageRecord {
    PackageRecord {
        slug: format!("puppetlabs-{name}"),
        name: name.to_string(),
        endorsement: None,
        source: String::new(),
    }
}

#[test]
fn empty_result_renders_nothing() {
    assert_eq!(render_report(&AuditResult::default(), &urls()), "");
}

#[test]
fn renders_all_sections_in_fixed_order() {
    let result = AuditResult {
        tag_module: vec![repo("puppetlabs-bar"), repo("puppetlabs-bar")],
        missing_readme_note: vec![json!("puppetlabs/puppetlabs-docs")],
        badge_supported: vec![package("foo")],
        badge_unsupported: vec![package("baz")],
        source_field_problem: vec![package("lost")],
    };
    let expected = "\
The following GitHub repositories appear to be missing the 'module' topic:
    * https://github.com/puppetlabs/puppetlabs-bar
    * https://github.com/puppetlabs/puppetlabs-bar

The following GitHub repositories appear to be missing the support tier README note:
    * https://github.com/puppetlabs/puppetlabs-docs

The following Forge modules should be badged as Supported:
    * https://forge.puppet.com/puppetlabs/foo

The following Forge modules should have the Supported badge removed:
    * https://forge.puppet.com/puppetlabs/baz

The following Forge modules have a problem with their source field. Either
the field could not be parsed, or it does not point to a valid public repo:
    * https://forge.puppet.com/puppetlabs/lost";
    assert_eq!(render_report(&result, &urls()), expected);
}

#[test]
fn omits_headers_for_empty_buckets() {
    let result = AuditResult {
        badge_unsupported: vec![package("baz")],
        source_field_problem: vec![package("lost")],
        ..AuditResult::default()
    };
    let report = render_report(&result, &urls());
    assert!(!report.contains("'module' topic"));
    assert!(!report.contains("README note"));
    assert!(!report.contains("badged as Supported"));
    assert!(report.starts_with("The following Forge modules should have the Supported badge removed:"));
    assert_eq!(report.matches("\n\n").count(), 1);
    assert!(!report.ends_with('\n'));
}

#[test]
fn non_string_readme_entries_render_as_json() {
    let result = AuditResult {
        missing_readme_note: vec![json!({ "name": "odd" })],
        ..AuditResult::default()
    };
    let report = render_report(&result, &urls());
    assert!(report.ends_with(r#"    * https://github.com/{"name":"odd"}"#));
}

#[test]
fn urls_follow_config() {
    let mut config = default_config();
    config.org = "voxpupuli".to_string();
    config.forge_url = "https://forge.example.com".to_string();
    let result = AuditResult {
        badge_supported: vec![package("nginx")],
        ..AuditResult::default()
    };
    let report = render_report(&result, &ReportUrls::from_config(&config));
    assert!(report.ends_with("    * https://forge.example.com/voxpupuli/nginx"));
}
