//! Data provider boundary: named input collections in, named outputs back.
//!
//! The audit core never fetches or persists anything itself. A provider hands
//! it fully materialized collections and receives the finished outputs.
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPOSITORIES: &str = "repositories";
pub const MODULES: &str = "modules";
pub const MISSING_README_NOTE: &str = "missing_readme_note";

pub const REPORT_OUTPUT: &str = "report";
pub const REPORT_FINDINGS_OUTPUT: &str = "report_findings";
pub const MODULE_REPOS_OUTPUT: &str = "module_repos";
pub const UNSUPPORTED_MODULE_REPOS_OUTPUT: &str = "unsupported_module_repos";
pub const UNTIERED_MODULE_REPOS_OUTPUT: &str = "untiered_module_repos";

/// A value published back to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    Names(Vec<String>),
    Text(String),
    Json(Value),
}

pub trait DataProvider {
    /// Fetch a named collection. Failure here is fatal for the run.
    fn get(&self, name: &str) -> Result<Vec<Value>>;

    /// Publish a named output.
    fn set(&mut self, name: &str, value: OutputValue) -> Result<()>;
}

/// Provider backed by a snapshot directory of `<name>.json` arrays.
///
/// Outputs go to `out_dir` when set (`<name>.txt` for text, `<name>.json`
/// otherwise); without one they are printed to stdout.
pub struct SnapshotDir {
    root: PathBuf,
    out_dir: Option<PathBuf>,
}

impl SnapshotDir {
    pub fn new(root: PathBuf, out_dir: Option<PathBuf>) -> Self {
        Self { root, out_dir }
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl DataProvider for SnapshotDir {
    fn get(&self, name: &str) -> Result<Vec<Value>> {
        let path = self.collection_path(name);
        let bytes =
            fs::read(&path).with_context(|| format!("read collection {}", path.display()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse collection JSON {}", path.display()))?;
        match value {
            Value::Array(items) => {
                tracing::debug!(collection = name, records = items.len(), "loaded collection");
                Ok(items)
            }
            _ => Err(anyhow!(
                "collection {name} in {} is not a JSON array",
                path.display()
            )),
        }
    }

    fn set(&mut self, name: &str, value: OutputValue) -> Result<()> {
        let Some(out_dir) = &self.out_dir else {
            return print_output(&value);
        };
        let (file_name, bytes) = match &value {
            OutputValue::Text(text) => (format!("{name}.txt"), text.as_bytes().to_vec()),
            other => (
                format!("{name}.json"),
                serde_json::to_vec_pretty(other).context("serialize output JSON")?,
            ),
        };
        write_output(&out_dir.join(file_name), &bytes)?;
        tracing::info!(output = name, dir = %out_dir.display(), "published output");
        Ok(())
    }
}

fn print_output(value: &OutputValue) -> Result<()> {
    match value {
        OutputValue::Text(text) => println!("{text}"),
        other => println!(
            "{}",
            serde_json::to_string_pretty(other).context("serialize output JSON")?
        ),
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// In-memory provider for exercising workflows without touching disk.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryProvider {
    collections: std::collections::BTreeMap<String, Vec<Value>>,
    outputs: std::collections::BTreeMap<String, OutputValue>,
}

#[cfg(test)]
impl MemoryProvider {
    pub fn with_collection(mut self, name: &str, items: Vec<Value>) -> Self {
        self.collections.insert(name.to_string(), items);
        self
    }

    pub fn output(&self, name: &str) -> Option<&OutputValue> {
        self.outputs.get(name)
    }
}

#[cfg(test)]
impl DataProvider for MemoryProvider {
    fn get(&self, name: &str) -> Result<Vec<Value>> {
        self.collections
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("collection {name} not available"))
    }

    fn set(&mut self, name: &str, value: OutputValue) -> Result<()> {
        self.outputs.insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
