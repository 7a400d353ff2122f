//! Name-keyed lookup over the repository snapshot.
use crate::records::RepositoryRecord;
use std::collections::{HashMap, HashSet};

/// Exact-match index from repository name to record.
///
/// Names are looked up as supplied; no case or whitespace folding. When the
/// snapshot carries a name twice, the first record in input order wins.
/// Names of repository records that failed to decode are tracked separately.
pub struct RepositoryIndex<'a> {
    by_name: HashMap<&'a str, &'a RepositoryRecord>,
    malformed: HashSet<&'a str>,
}

impl<'a> RepositoryIndex<'a> {
    pub fn build(repositories: &'a [RepositoryRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(repositories.len());
        for repo in repositories {
            by_name.entry(repo.name.as_str()).or_insert(repo);
        }
        Self {
            by_name,
            malformed: HashSet::new(),
        }
    }

    /// Record names of repositories that were present but malformed.
    pub fn with_malformed<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.malformed.extend(names);
        self
    }

    /// True when `name` has no valid record but a malformed one exists.
    pub fn is_malformed(&self, name: &str) -> bool {
        !self.by_name.contains_key(name) && self.malformed.contains(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&'a RepositoryRecord> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
