//! Temporary workspaces and settings files
//!
//! Provides directories with known files so dispatch can resolve real paths,
//! and settings files for the CLI's `--config` flag.

#![allow(dead_code)]

use fzf_quick_open::core::record::{SelectionCommand, SelectionRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory that lives as long as the value.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a file (and its parent directories) relative to the workspace.
    pub fn create_file(&self, relative: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn create_dir(&self, relative: &str) -> anyhow::Result<PathBuf> {
        let path = self.path.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Write a `config.json` with the given JSON content.
    pub fn write_settings(&self, json: &str) -> anyhow::Result<PathBuf> {
        self.create_file("config.json", json)
    }
}

/// Sets up an empty workspace
pub fn setup_workspace() -> anyhow::Result<TestWorkspace> {
    let temp_dir = TempDir::new()?;
    // Resolve symlinked temp roots so paths match the process's cwd
    let path = temp_dir.path().canonicalize()?;
    Ok(TestWorkspace { temp_dir, path })
}

/// Scenario: a small project with sources, docs and a nested folder
pub fn create_project_workspace() -> anyhow::Result<TestWorkspace> {
    let workspace = setup_workspace()?;
    workspace.create_file("README.md", "# project\n")?;
    workspace.create_file("src/main.rs", "fn main() {}\n")?;
    workspace.create_file("src/lib.rs", "pub fn lib() {}\n")?;
    workspace.create_dir("crates/helper")?;
    Ok(workspace)
}

pub fn record(command: SelectionCommand, cwd: &Path, argument: &str) -> SelectionRecord {
    SelectionRecord {
        command,
        working_directory: cwd.to_path_buf(),
        argument: argument.to_string(),
    }
}
