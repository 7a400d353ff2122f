//! Shared test infrastructure for integration tests.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Snapshot directory populated with the three input collections.
pub struct Snapshot {
    pub dir: TempDir,
}

impl Snapshot {
    pub fn new(repositories: Value, modules: Value, missing_readme_note: Value) -> Self {
        let dir = tempfile::tempdir().expect("create snapshot dir");
        write_json(&dir.path().join("repositories.json"), &repositories);
        write_json(&dir.path().join("modules.json"), &modules);
        write_json(
            &dir.path().join("missing_readme_note.json"),
            &missing_readme_note,
        );
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }
}

pub fn write_json(path: &Path, value: &Value) {
    let text = serde_json::to_string_pretty(value).expect("serialize fixture");
    std::fs::write(path, text).expect("write fixture");
}

/// Run the compiled binary with `args`, isolated from any user config.
pub fn run_forge_audit(args: &[&str]) -> Output {
    let home = tempfile::tempdir().expect("create home dir");
    Command::new(env!("CARGO_BIN_EXE_forge-audit"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("run forge-audit")
}
