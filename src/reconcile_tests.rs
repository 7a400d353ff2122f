use super::*;
use crate::records::RepositoryRecord;

fn repo(name: &str, topics: &[&str]) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        topics: topics.iter().map(|topic| topic.to_string()).collect(),
    }
}

fn package(slug: &str, endorsement: Option<&str>, source: &str) -> PackageRecord {
    PackageRecord {
        slug: slug.to_string(),
        name: slug.to_string(),
        endorsement: endorsement.map(str::to_string),
        source: source.to_string(),
    }
}

fn matcher() -> SourceMatcher {
    SourceMatcher::new("puppetlabs").expect("compile matcher")
}

#[test]
fn consistent_pair_has_no_defects() {
    let repos = vec![repo("foo", &["module", "supported"])];
    let index = RepositoryIndex::build(&repos);
    let pkg = package(
        "foo",
        Some("supported"),
        "https://github.com/puppetlabs/foo",
    );
    let findings = examine_package(&pkg, &index, &matcher());
    assert_eq!(
        findings,
        PackageFindings::Resolved {
            package: &pkg,
            repository: &repos[0],
            defects: Defects::default(),
        }
    );
}

#[test]
fn ssh_source_resolves_and_flags_missing_badge() {
    let repos = vec![repo("foo", &["module", "supported"])];
    let index = RepositoryIndex::build(&repos);
    let pkg = package("foo", Some("unsupported"), "git@github.com:puppetlabs/foo");
    match examine_package(&pkg, &index, &matcher()) {
        PackageFindings::Resolved { defects, .. } => {
            assert_eq!(defects.badge, Some(BadgeDefect::ShouldBadgeSupported));
            assert!(!defects.missing_module_topic);
        }
        other => panic!("expected resolved findings, got {other:?}"),
    }
}

#[test]
fn null_endorsement_on_supported_repo_needs_badge() {
    let repos = vec![repo("foo", &["module", "supported"])];
    let pkg = package("foo", None, "https://github.com/puppetlabs/foo");
    assert_eq!(
        evaluate_defects(&pkg, &repos[0]).badge,
        Some(BadgeDefect::ShouldBadgeSupported)
    );
}

#[test]
fn repo_without_module_topic_is_flagged() {
    let repos = vec![repo("bar", &["supported"])];
    let pkg = package("bar", Some("supported"), "https://github.com/puppetlabs/bar");
    let defects = evaluate_defects(&pkg, &repos[0]);
    assert!(defects.missing_module_topic);
    assert_eq!(defects.badge, None);
}

#[test]
fn supported_module_on_untagged_repo_loses_badge() {
    let repos = vec![repo("baz", &["module"])];
    let pkg = package(
        "baz",
        Some("supported"),
        "https://github.com/puppetlabs/baz",
    );
    let defects = evaluate_defects(&pkg, &repos[0]);
    assert_eq!(defects.badge, Some(BadgeDefect::ShouldRemoveSupportedBadge));
    assert!(!defects.missing_module_topic);
}

#[test]
fn missing_module_topic_and_badge_defect_fire_together() {
    let repos = vec![repo("qux", &[])];
    let pkg = package("qux", Some("supported"), "github.com/puppetlabs/qux");
    let defects = evaluate_defects(&pkg, &repos[0]);
    assert!(defects.missing_module_topic);
    assert_eq!(defects.badge, Some(BadgeDefect::ShouldRemoveSupportedBadge));
}

#[test]
fn unparseable_source_is_unresolved() {
    let repos = vec![repo("foo", &["module"])];
    let index = RepositoryIndex::build(&repos);
    let pkg = package("foo", Some("supported"), "https://example.com/not-a-repo");
    assert_eq!(
        reconcile(&pkg, &index, &matcher()),
        Outcome::Unresolved(UnresolvedReason::Unparseable(MatchFailure))
    );
}

#[test]
fn unknown_repository_is_unresolved() {
    let repos = vec![repo("foo", &["module"])];
    let index = RepositoryIndex::build(&repos);
    let pkg = package("gone", None, "https://github.com/puppetlabs/gone");
    assert_eq!(
        reconcile(&pkg, &index, &matcher()),
        Outcome::Unresolved(UnresolvedReason::UnknownRepository("gone".to_string()))
    );
}

#[test]
fn reconcile_packages_preserves_input_order() {
    let repos = vec![repo("a", &["module"]), repo("b", &["module"])];
    let index = RepositoryIndex::build(&repos);
    let packages = vec![
        package("b", None, "github.com/puppetlabs/b"),
        package("x", None, "nowhere"),
        package("a", None, "github.com/puppetlabs/a"),
    ];
    let findings = reconcile_packages(&packages, &index, &matcher());
    let slugs: Vec<&str> = findings
        .iter()
        .map(|findings| findings.package().slug.as_str())
        .collect();
    assert_eq!(slugs, vec!["b", "x", "a"]);
    assert!(matches!(findings[1], PackageFindings::Unresolved { .. }));
}

#[test]
fn source_pointing_at_malformed_repository_is_skipped() {
    let repos = vec![repo("foo", &["module"])];
    let index = RepositoryIndex::build(&repos).with_malformed(["bar"]);
    let pkg = package("bar", Some("supported"), "https://github.com/puppetlabs/bar");
    assert_eq!(
        reconcile(&pkg, &index, &matcher()),
        Outcome::MalformedRepository("bar".to_string())
    );
    assert_eq!(
        examine_package(&pkg, &index, &matcher()),
        PackageFindings::Skipped {
            package: &pkg,
            repository: "bar".to_string(),
        }
    );
}
