//! Shared helpers for the integration suite.
//!
//! Every test gets its own temporary home directory, so the binary never sees the
//! real `~/.claude.json`.

#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated home directory with helpers to run `mcp-patch` against it.
pub struct TestHome {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    home: PathBuf,
}

impl TestHome {
    /// Create an empty home directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let home = temp_dir.path().join("home");
        fs::create_dir_all(&home)?;

        Ok(Self {
            _temp_dir: temp_dir,
            home,
        })
    }

    /// The home directory
    pub fn path(&self) -> &Path {
        &self.home
    }

    /// `<home>/.claude.json`
    pub fn claude_json(&self) -> PathBuf {
        self.home.join(".claude.json")
    }

    /// `<home>/.claude/claude_desktop_config.json`
    pub fn desktop_json(&self) -> PathBuf {
        self.home.join(".claude").join("claude_desktop_config.json")
    }

    /// Write `content` to `name` under the home directory
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.home.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write a JSON value to `<home>/.claude.json`
    pub fn write_claude_json(&self, value: &Value) -> Result<PathBuf> {
        self.write(".claude.json", &serde_json::to_string_pretty(value)?)
    }

    /// Read and parse a JSON file
    pub fn read_json(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// A command for the binary with HOME pointed at this directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mcp-patch"));
        cmd.current_dir(&self.home)
            .env("HOME", &self.home)
            .env("USERPROFILE", &self.home)
            .env("NO_COLOR", "1")
            .env_remove("MCP_PATCH_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run the binary and capture its output
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.command().args(args).output().context("Failed to run mcp-patch")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(self.success, "Command failed with code {:?}\nStderr: {}", self.code, self.stderr);
        self
    }

    /// Assert the command failed with exit code 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected exit code 1\nStdout: {}\nStderr: {}", self.stdout, self.stderr);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected file to not exist: {}", path.display());
    }

    /// Assert a file has exact content
    pub fn equals(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
        assert_eq!(content, expected, "File {} content mismatch", path.display());
    }
}
