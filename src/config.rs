//! Audit configuration helpers.
//!
//! The config names the GitHub organization and the URL bases used in the
//! report. Every field has a default, so running without a config file audits
//! the `puppetlabs` organization.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

const DEFAULT_ORG: &str = "puppetlabs";
const DEFAULT_GITHUB_URL: &str = "https://github.com";
const DEFAULT_FORGE_URL: &str = "https://forge.puppet.com";
const CONFIG_DIR_NAME: &str = "forge-audit";
const CONFIG_FILE_NAME: &str = "config.json";

/// Pack-independent settings for an audit run, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    pub schema_version: u32,
    /// GitHub organization owning both repositories and Forge modules.
    #[serde(default = "default_org")]
    pub org: String,
    #[serde(default = "default_github_url")]
    pub github_url: String,
    #[serde(default = "default_forge_url")]
    pub forge_url: String,
    /// Topics that count as a recognized support tier for module repositories.
    #[serde(default = "default_support_tier_topics")]
    pub support_tier_topics: Vec<String>,
}

fn default_org() -> String {
    DEFAULT_ORG.to_string()
}

fn default_github_url() -> String {
    DEFAULT_GITHUB_URL.to_string()
}

fn default_forge_url() -> String {
    DEFAULT_FORGE_URL.to_string()
}

fn default_support_tier_topics() -> Vec<String> {
    vec!["supported".to_string(), "unsupported".to_string()]
}

pub fn default_config() -> AuditConfig {
    AuditConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        org: default_org(),
        github_url: default_github_url(),
        forge_url: default_forge_url(),
        support_tier_topics: default_support_tier_topics(),
    }
}

/// User-level config location, e.g. `~/.config/forge-audit/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load a config from an explicit path.
pub fn load_config(path: &Path) -> Result<AuditConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: AuditConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(config)
}

/// Resolve the effective config: explicit path, then the user config file when
/// it exists, then defaults. The result is validated and normalized.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AuditConfig> {
    let user_path = default_config_path().filter(|path| path.is_file());
    let config = match explicit.map(Path::to_path_buf).or(user_path) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_config(&path)?
        }
        None => default_config(),
    };
    validate_config(&config)?;
    Ok(normalize_config(config))
}

pub fn validate_config(config: &AuditConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    let org = config.org.trim();
    if org.is_empty() {
        return Err(anyhow!("org must be non-empty"));
    }
    if !org
        .chars()
        .all(|ch| ch.is_alphanumeric() || ch == '-' || ch == '_')
    {
        return Err(anyhow!(
            "org must contain only word characters and hyphens (got {org:?})"
        ));
    }
    validate_url(&config.github_url, "github_url")?;
    validate_url(&config.forge_url, "forge_url")?;
    if config
        .support_tier_topics
        .iter()
        .any(|topic| topic.trim().is_empty())
    {
        return Err(anyhow!("support_tier_topics entries must be non-empty"));
    }
    Ok(())
}

fn validate_url(url: &str, label: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(anyhow!("{label} must be an http(s) URL (got {url:?})"));
    }
    Ok(())
}

/// Trim whitespace and trailing slashes so URLs join with a single `/`.
pub fn normalize_config(mut config: AuditConfig) -> AuditConfig {
    config.org = config.org.trim().to_string();
    config.github_url = config.github_url.trim().trim_end_matches('/').to_string();
    config.forge_url = config.forge_url.trim().trim_end_matches('/').to_string();
    config
}

/// Render the effective config as pretty JSON.
pub fn config_json(config: &AuditConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("serialize config")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
