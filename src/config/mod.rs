//! Patch plans: the explicit configuration for one patching run.
//!
//! A plan names the document to edit and the operations to apply, replacing
//! hardcoded file paths and literal payloads with data:
//!
//! ```toml
//! document_path = "~/.claude.json"
//! create = false
//! backup = true
//!
//! [[operations]]
//! path = ["mcpServers", "supabase"]
//! set = { type = "stdio", command = "npx", args = ["-y", "@supabase/mcp-server-supabase@latest"] }
//!
//! [[operations]]
//! path = "projects./home/me/app.mcpServers.supabase"
//! remove = true
//! ```
//!
//! `~` and `$VAR` in `document_path` are expanded; a relative `document_path` is
//! resolved against the directory containing the plan file.

use crate::core::PatchError;
use crate::document::{PatchOperation, PatchOutcome};
use crate::patcher::{ConfigPatcher, Edited, WriteMode};
use crate::utils::platform::{resolve_path, resolve_relative_to};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where to read and write, and which operations to apply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchPlan {
    /// Configuration document to patch
    pub document_path: PathBuf,

    /// Start from `{}` when the document does not exist
    #[serde(default)]
    pub create: bool,

    /// Copy the previous document to `<file>.bak` before writing
    #[serde(default)]
    pub backup: bool,

    /// Operations, applied in order
    #[serde(default)]
    pub operations: Vec<PatchOperation>,
}

impl PatchPlan {
    /// A plan with no operations for `document_path`.
    #[must_use]
    pub fn new(document_path: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
            create: false,
            backup: false,
            operations: Vec::new(),
        }
    }

    /// Appends an operation.
    #[must_use]
    pub fn with_operation(mut self, operation: PatchOperation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Sets whether a missing document starts out empty.
    #[must_use]
    pub const fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Sets whether a backup is taken before writing.
    #[must_use]
    pub const fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Loads a plan from a TOML file and resolves its document path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid plan, or its
    /// document path cannot be expanded.
    pub fn load(path: &Path) -> Result<Self> {
        let mut plan: Self = crate::utils::fs::formats::read_toml_file(path)
            .with_context(|| format!("Failed to load patch plan: {}", path.display()))?;

        let raw = plan.document_path.to_string_lossy().to_string();
        let expanded = resolve_path(&raw)
            .with_context(|| format!("Failed to resolve document_path in {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        plan.document_path = resolve_relative_to(&expanded, base);

        debug!(
            target: "plan",
            "Loaded plan {} targeting {} with {} operation(s)",
            path.display(),
            plan.document_path.display(),
            plan.operations.len()
        );
        Ok(plan)
    }

    /// Checks the plan before anything is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidPlan`] if `document_path` is empty.
    pub fn validate(&self) -> Result<(), PatchError> {
        if self.document_path.as_os_str().is_empty() {
            return Err(PatchError::InvalidPlan {
                reason: "document_path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The patcher this plan describes.
    #[must_use]
    pub fn patcher(&self, mode: WriteMode) -> ConfigPatcher {
        ConfigPatcher::new(&self.document_path)
            .with_create(self.create)
            .with_backup(self.backup)
            .with_mode(mode)
    }

    /// Loads the document, applies every operation in order and saves it.
    ///
    /// # Errors
    ///
    /// Returns validation, load, operation or save errors. The document on disk is
    /// untouched unless every operation succeeded.
    pub fn run(&self, mode: WriteMode) -> Result<Edited<Vec<PatchOutcome>>> {
        self.validate()?;
        self.patcher(mode).apply(&self.operations)
    }
}
