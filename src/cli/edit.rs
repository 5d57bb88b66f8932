//! Direct key-path edits: `set`, `remove` and `show`.

use super::common::{DocumentArgs, Reporter};
use crate::core::PatchError;
use crate::document::{KeyPath, PatchOperation};
use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

/// Set a key to a JSON value, creating intermediate objects.
#[derive(Debug, Args)]
pub struct SetCommand {
    /// Key path, dotted (`mcpServers.supabase`) or a JSON array of keys
    #[arg(value_name = "KEY_PATH")]
    path: KeyPath,

    /// Value to store, as JSON (`'{"type": "stdio"}'`, `true`, `"text"`)
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    value: String,

    /// Store VALUE as a plain string instead of parsing it as JSON
    #[arg(long)]
    string: bool,
}

impl SetCommand {
    /// Parses the value and sets it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not valid JSON (without `--string`), or
    /// for any load, conflict or save failure.
    pub fn execute(self, options: &DocumentArgs, reporter: Reporter) -> Result<()> {
        let value = if self.string {
            Value::String(self.value)
        } else {
            serde_json::from_str(&self.value).with_context(|| {
                format!("VALUE is not valid JSON: {} (use --string to store it as text)", self.value)
            })?
        };

        let operation = PatchOperation::set(self.path.clone(), value);
        let edited = options.patcher()?.apply(std::slice::from_ref(&operation))?;

        let changed = edited.value.iter().any(|outcome| outcome.is_change());
        reporter.finish(&edited, &format!("Set {}", self.path), changed)
    }
}

/// Remove a key; succeeds when it is already absent.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Key path, dotted (`mcpServers.supabase`) or a JSON array of keys
    #[arg(value_name = "KEY_PATH")]
    path: KeyPath,
}

impl RemoveCommand {
    /// Removes the key.
    ///
    /// # Errors
    ///
    /// Returns load or save errors.
    pub fn execute(self, options: &DocumentArgs, reporter: Reporter) -> Result<()> {
        let operation = PatchOperation::remove(self.path.clone());
        let edited = options.patcher()?.apply(std::slice::from_ref(&operation))?;

        let changed = edited.value.iter().any(|outcome| outcome.is_change());
        reporter.finish(&edited, &format!("Removed {}", self.path), changed)
    }
}

/// Print the document, or the value at a key path, as JSON.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Key path to print; the whole document when omitted
    #[arg(value_name = "KEY_PATH")]
    path: Option<KeyPath>,
}

impl ShowCommand {
    /// Loads the document and prints the selected value.
    ///
    /// # Errors
    ///
    /// Returns load errors, or [`PatchError::EntryNotFound`] if the path does not
    /// exist.
    pub fn execute(self, options: &DocumentArgs) -> Result<()> {
        let document = options.patcher()?.load()?;

        let value = match &self.path {
            Some(path) => document.get(path).cloned().ok_or_else(|| PatchError::EntryNotFound {
                path: path.to_string(),
            })?,
            None => document.to_value(),
        };

        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }
}
