//! Module repository filtering (the single-signal pipeline).
//!
//! One pass over the repository snapshot, no cross-referencing with the Forge.
use crate::config::AuditConfig;
use crate::records::{RepositoryRecord, MODULE_TOPIC, SUPPORTED_TOPIC};
use serde::Serialize;

/// Full names (`<org>/<name>`) of module repositories, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleRepoLists {
    /// Every repository tagged `module`.
    pub modules: Vec<String>,
    /// Module repositories not tagged `supported`.
    pub unsupported: Vec<String>,
    /// Module repositories carrying none of the configured support-tier topics.
    pub untiered: Vec<String>,
}

pub fn filter_module_repos(
    repositories: &[RepositoryRecord],
    config: &AuditConfig,
) -> ModuleRepoLists {
    let mut lists = ModuleRepoLists::default();
    for repo in repositories.iter().filter(|repo| repo.has_topic(MODULE_TOPIC)) {
        let full_name = format!("{}/{}", config.org, repo.name);
        if !repo.has_topic(SUPPORTED_TOPIC) {
            lists.unsupported.push(full_name.clone());
        }
        if !config
            .support_tier_topics
            .iter()
            .any(|topic| repo.has_topic(topic))
        {
            lists.untiered.push(full_name.clone());
        }
        lists.modules.push(full_name);
    }
    lists
}
