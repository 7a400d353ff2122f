//! Plain-text rendering of audit findings.
//!
//! Sections appear in a fixed order and only when their bucket has entries.
//! Sections are separated by one blank line; an audit with no findings renders
//! as an empty string.
use crate::aggregate::AuditResult;
use crate::config::AuditConfig;
use serde_json::Value;

const TAG_MODULE_TITLE: &str =
    "The following GitHub repositories appear to be missing the 'module' topic:";
const MISSING_README_NOTE_TITLE: &str =
    "The following GitHub repositories appear to be missing the support tier README note:";
const BADGE_SUPPORTED_TITLE: &str = "The following Forge modules should be badged as Supported:";
const BADGE_UNSUPPORTED_TITLE: &str =
    "The following Forge modules should have the Supported badge removed:";
const SOURCE_FIELD_PROBLEM_TITLE: &str = "The following Forge modules have a problem with their source field. Either\nthe field could not be parsed, or it does not point to a valid public repo:";

const BULLET: &str = "    * ";

/// URL bases used to link report entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportUrls {
    pub github_url: String,
    pub forge_url: String,
    pub org: String,
}

impl ReportUrls {
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            github_url: config.github_url.clone(),
            forge_url: config.forge_url.clone(),
            org: config.org.clone(),
        }
    }

    pub fn repository(&self, name: &str) -> String {
        format!("{}/{}/{}", self.github_url, self.org, name)
    }

    pub fn module(&self, name: &str) -> String {
        format!("{}/{}/{}", self.forge_url, self.org, name)
    }

    /// Missing-readme entries are already `<org>/<name>` paths.
    fn readme_entry(&self, entry: &Value) -> String {
        match entry {
            Value::String(path) => format!("{}/{}", self.github_url, path),
            other => format!("{}/{}", self.github_url, other),
        }
    }
}

pub fn render_report(result: &AuditResult, urls: &ReportUrls) -> String {
    let mut sections = Vec::new();
    if !result.tag_module.is_empty() {
        sections.push(render_section(
            TAG_MODULE_TITLE,
            result.tag_module.iter().map(|repo| urls.repository(&repo.name)),
        ));
    }
    if !result.missing_readme_note.is_empty() {
        sections.push(render_section(
            MISSING_README_NOTE_TITLE,
            result
                .missing_readme_note
                .iter()
                .map(|entry| urls.readme_entry(entry)),
        ));
    }
    if !result.badge_supported.is_empty() {
        sections.push(render_section(
            BADGE_SUPPORTED_TITLE,
            result.badge_supported.iter().map(|pkg| urls.module(&pkg.name)),
        ));
    }
    if !result.badge_unsupported.is_empty() {
        sections.push(render_section(
            BADGE_UNSUPPORTED_TITLE,
            result
                .badge_unsupported
                .iter()
                .map(|pkg| urls.module(&pkg.name)),
        ));
    }
    if !result.source_field_problem.is_empty() {
        sections.push(render_section(
            SOURCE_FIELD_PROBLEM_TITLE,
            result
                .source_field_problem
                .iter()
                .map(|pkg| urls.module(&pkg.name)),
        ));
    }
    sections.join("\n\n")
}

fn render_section<I>(title: &str, urls: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::from(title);
    for url in urls {
        out.push('\n');
        out.push_str(BULLET);
        out.push_str(&url);
    }
    out
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
