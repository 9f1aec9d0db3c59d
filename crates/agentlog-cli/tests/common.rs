//! Shared fixture for CLI integration tests.
//!
//! Every test gets its own Codex and Claude session roots and a config path
//! that does not exist, so the user's real logs and settings never leak in.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CODEX_SAMPLE_ID: &str = "0199a1b2-codex-sample";
pub const CLAUDE_SAMPLE_ID: &str = "5f3c-claude-sample";

pub struct TestFixture {
    temp_dir: TempDir,
    codex_root: PathBuf,
    claude_root: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let codex_root = temp_dir.path().join("codex/sessions");
        let claude_root = temp_dir.path().join("claude/projects");

        fs::create_dir_all(&codex_root).expect("Failed to create codex dir");
        fs::create_dir_all(&claude_root).expect("Failed to create claude dir");

        Self {
            temp_dir,
            codex_root,
            claude_root,
        }
    }

    pub fn codex_root(&self) -> &Path {
        &self.codex_root
    }

    pub fn claude_root(&self) -> &Path {
        &self.claude_root
    }

    pub fn sample_path(sample_name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("agentlog-providers/tests/samples")
            .join(sample_name)
    }

    /// Copy a sample into the Codex root at `relative` (e.g. `2025/10/01/rollout.jsonl`)
    pub fn add_codex_session(&self, sample_name: &str, relative: &str) -> PathBuf {
        Self::copy_to(&Self::sample_path(sample_name), &self.codex_root.join(relative))
    }

    /// Copy a sample into a Claude project directory
    pub fn add_claude_session(&self, sample_name: &str, project_dir: &str, file_name: &str) -> PathBuf {
        let dest = self.claude_root.join(project_dir).join(file_name);
        Self::copy_to(&Self::sample_path(sample_name), &dest)
    }

    pub fn write_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    fn copy_to(source: &Path, dest: &Path) -> PathBuf {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::copy(source, dest).expect("Failed to copy sample");
        dest.to_path_buf()
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("agentlog");
        cmd.env("AGENTLOG_CONFIG", self.temp_dir.path().join("config.toml"))
            .env("AGENTLOG_CODEX_DIR", &self.codex_root)
            .env("AGENTLOG_CLAUDE_DIR", &self.claude_root)
            .env("NO_COLOR", "1")
            .env_remove("PAGER")
            .env_remove("RUST_LOG")
            .env_remove("COLUMNS");
        cmd
    }
}
