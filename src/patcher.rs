//! The load → mutate → save pipeline around a single configuration file.
//!
//! [`ConfigPatcher`] owns *where* the document lives and *how* it is persisted
//! (create when missing, keep a `.bak`, or only preview). What changes is supplied
//! by the caller, either as a list of [`PatchOperation`]s or as a closure for edits
//! that need to inspect the document first (see [`crate::mcp`]).
//!
//! Nothing is written unless every step before saving succeeded.

use crate::document::{ConfigDocument, PatchOperation, PatchOutcome};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How the edited document is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write the document back to its path
    #[default]
    Write,
    /// Apply edits in memory only
    DryRun,
}

/// Loads, edits and saves one configuration document.
#[derive(Debug, Clone)]
pub struct ConfigPatcher {
    path: PathBuf,
    create: bool,
    backup: bool,
    mode: WriteMode,
}

/// What an edit did, returned alongside the closure's own result.
#[derive(Debug)]
pub struct Edited<T> {
    /// Path of the document
    pub path: PathBuf,
    /// The document after the edit
    pub document: ConfigDocument,
    /// Value returned by the edit closure
    pub value: T,
    /// Whether the file on disk was (re)written
    pub written: bool,
    /// Location of the backup taken before writing, if any
    pub backup: Option<PathBuf>,
}

impl ConfigPatcher {
    /// Patcher for the document at `path`; by default a missing file is an error.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create: false,
            backup: false,
            mode: WriteMode::Write,
        }
    }

    /// Start from an empty document when the file does not exist.
    #[must_use]
    pub const fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Copy the previous file to `<file>.bak` before writing.
    #[must_use]
    pub const fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Choose between writing and previewing.
    #[must_use]
    pub const fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Path of the managed document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, honoring the create option.
    ///
    /// # Errors
    ///
    /// Returns a load-family [`crate::core::PatchError`].
    pub fn load(&self) -> Result<ConfigDocument> {
        let document = if self.create {
            ConfigDocument::load_or_default(&self.path)?
        } else {
            ConfigDocument::load(&self.path)?
        };
        Ok(document)
    }

    /// Saves `document`, taking a backup first when enabled.
    ///
    /// Returns the backup location, if one was made.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup cannot be taken or the document cannot be
    /// written.
    pub fn save(&self, document: &ConfigDocument) -> Result<Option<PathBuf>> {
        let backup = if self.backup {
            crate::utils::create_backup(&self.path)?
        } else {
            None
        };
        document.save(&self.path)?;
        info!(target: "patcher", "Wrote {}", self.path.display());
        Ok(backup)
    }

    /// Runs the full pipeline with an arbitrary edit.
    ///
    /// The closure receives the freshly loaded document. If it fails, nothing is
    /// written. In [`WriteMode::DryRun`] nothing is written either way.
    ///
    /// # Errors
    ///
    /// Returns load errors, the closure's error, or save errors.
    pub fn edit<T, F>(&self, edit: F) -> Result<Edited<T>>
    where
        F: FnOnce(&mut ConfigDocument) -> Result<T>,
    {
        let mut document = self.load()?;
        let value = edit(&mut document)?;

        let (written, backup) = match self.mode {
            WriteMode::Write => (true, self.save(&document)?),
            WriteMode::DryRun => {
                debug!(target: "patcher", "Dry run, not writing {}", self.path.display());
                (false, None)
            }
        };

        Ok(Edited {
            path: self.path.clone(),
            document,
            value,
            written,
            backup,
        })
    }

    /// Runs the full pipeline with a list of operations, applied in order.
    ///
    /// # Errors
    ///
    /// Returns load errors, the first failing operation's error (with the operation
    /// named in the context), or save errors.
    pub fn apply(&self, operations: &[PatchOperation]) -> Result<Edited<Vec<PatchOutcome>>> {
        self.edit(|document| {
            operations
                .iter()
                .map(|op| {
                    document
                        .apply(op)
                        .with_context(|| format!("Failed to {op} in {}", self.path.display()))
                })
                .collect()
        })
    }
}
