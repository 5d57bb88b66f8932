//! In-memory JSON configuration documents and path-addressed patching.
//!
//! A [`ConfigDocument`] is the whole configuration file held as an untyped JSON
//! object. Edits are expressed as [`PatchOperation`]s addressed by a [`KeyPath`]:
//!
//! - [`ConfigDocument::ensure_path`] walks a path, creating missing intermediate
//!   objects, and hands back the object that holds the final key
//! - [`ConfigDocument::apply_patch`] overwrites the final key
//! - [`ConfigDocument::remove_path`] deletes the final key, doing nothing when absent
//!
//! Content that no operation touches survives a load/save cycle unchanged, key
//! order included (`serde_json` is built with `preserve_order`).
//!
//! # Example
//!
//! ```rust
//! use mcp_patch::document::{ConfigDocument, KeyPath};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), mcp_patch::core::PatchError> {
//! let mut doc = ConfigDocument::from_value(json!({"mcpServers": {"other": {"x": 1}}}))?;
//! let path: KeyPath = "mcpServers.supabase".parse()?;
//! doc.apply_patch(&path, json!({"type": "stdio"}))?;
//!
//! assert_eq!(
//!     doc.to_value(),
//!     json!({"mcpServers": {"other": {"x": 1}, "supabase": {"type": "stdio"}}})
//! );
//! # Ok(())
//! # }
//! ```

mod key_path;
mod operation;


pub use key_path::KeyPath;
pub use operation::{PatchAction, PatchOperation};

use crate::core::PatchError;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Result of applying a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The key did not exist and was created
    Inserted,
    /// The key existed with a different value and was overwritten
    Replaced,
    /// The key already held exactly this value
    Unchanged,
    /// The key existed and was deleted
    Removed,
    /// Removal was requested but the key was not there
    Absent,
}

impl PatchOutcome {
    /// Whether the document differs after the operation.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Inserted | Self::Replaced | Self::Removed)
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inserted => "inserted",
            Self::Replaced => "replaced",
            Self::Unchanged => "unchanged",
            Self::Removed => "removed",
            Self::Absent => "absent",
        })
    }
}

/// A configuration file loaded wholesale into memory.
///
/// The root is always a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// An empty document, `{}`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an in-memory JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::DocumentNotObject`] if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, PatchError> {
        match value {
            Value::Object(root) => Ok(Self {
                root,
            }),
            other => Err(PatchError::DocumentNotObject {
                path: "<memory>".to_string(),
                found: json_type_name(&other).to_string(),
            }),
        }
    }

    /// Parses document text; `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::DocumentParseFailed`] for invalid JSON and
    /// [`PatchError::DocumentNotObject`] when the root is not an object.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, PatchError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| PatchError::DocumentParseFailed {
                path: origin.display().to_string(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(root) => Ok(Self {
                root,
            }),
            other => Err(PatchError::DocumentNotObject {
                path: origin.display().to_string(),
                found: json_type_name(&other).to_string(),
            }),
        }
    }

    /// Reads and parses the document at `path`.
    ///
    /// Nothing is written on any failure.
    ///
    /// # Errors
    ///
    /// - [`PatchError::DocumentNotFound`] if the file does not exist
    /// - [`PatchError::DocumentReadFailed`] if it cannot be read (permissions, not
    ///   UTF-8, is a directory, ...)
    /// - [`PatchError::DocumentParseFailed`] / [`PatchError::DocumentNotObject`] as
    ///   for [`parse`](Self::parse)
    pub fn load(path: &Path) -> Result<Self, PatchError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PatchError::DocumentNotFound {
                path: path.display().to_string(),
            },
            _ => PatchError::DocumentReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        let document = Self::parse(&content, path)?;
        debug!(target: "document", "Loaded {} ({} top-level keys)", path.display(), document.root.len());
        Ok(document)
    }

    /// Like [`load`](Self::load), but a missing file yields an empty document.
    ///
    /// Malformed content is still an error.
    ///
    /// # Errors
    ///
    /// Any [`load`](Self::load) error other than [`PatchError::DocumentNotFound`].
    pub fn load_or_default(path: &Path) -> Result<Self, PatchError> {
        match Self::load(path) {
            Err(PatchError::DocumentNotFound { .. }) => {
                debug!(target: "document", "{} does not exist, starting empty", path.display());
                Ok(Self::new())
            }
            result => result,
        }
    }

    /// Serializes the document with two-space indentation and a trailing newline.
    ///
    /// # Errors
    ///
    /// Serialization of a `serde_json::Value` cannot realistically fail, but the
    /// error is reported as [`PatchError::Other`] rather than panicking.
    pub fn to_pretty_string(&self) -> Result<String, PatchError> {
        let mut text = serde_json::to_string_pretty(&self.root).map_err(|e| PatchError::Other {
            message: format!("Failed to serialize document: {e}"),
        })?;
        text.push('\n');
        Ok(text)
    }

    /// Writes the document to `path` atomically, replacing prior contents.
    ///
    /// The in-memory document is left as is when writing fails.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::DocumentWriteFailed`] if the destination cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), PatchError> {
        crate::utils::fs::formats::write_json_file(path, &self.root, true).map_err(|e| {
            PatchError::DocumentWriteFailed {
                path: path.display().to_string(),
                reason: format!("{e:#}"),
            }
        })?;
        debug!(target: "document", "Saved {}", path.display());
        Ok(())
    }

    /// The root object.
    #[must_use]
    pub const fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// A copy of the whole document as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Looks up the value at `path`, if every segment exists.
    #[must_use]
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let (parents, last) = path.split_last();
        let mut current = &self.root;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)
    }

    /// Walks `path` (all segments but the last), creating an empty object for each
    /// missing segment, and returns the object that holds the final key.
    ///
    /// Existing intermediate objects are reused as they are, so siblings at every
    /// level are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::PathConflict`] if an intermediate key exists but holds
    /// something other than an object. The document is not modified in that case.
    pub fn ensure_path(&mut self, path: &KeyPath) -> Result<&mut Map<String, Value>, PatchError> {
        self.check_path(path)?;

        let (parents, _) = path.split_last();
        let mut current = &mut self.root;
        for segment in parents {
            let entry = current.entry(segment.clone()).or_insert_with(|| Value::Object(Map::new()));
            current = match entry {
                Value::Object(map) => map,
                // Unreachable after check_path, but never replace data if it happens
                other => {
                    return Err(PatchError::PathConflict {
                        segment: segment.clone(),
                        found: json_type_name(other).to_string(),
                    });
                }
            };
        }
        Ok(current)
    }

    /// Sets the final key of `path` to `value`, creating intermediate objects.
    ///
    /// Applying the same patch twice leaves the document as after the first time.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::PathConflict`] as for [`ensure_path`](Self::ensure_path).
    pub fn apply_patch(&mut self, path: &KeyPath, value: Value) -> Result<PatchOutcome, PatchError> {
        let key = path.last().to_string();
        let map = self.ensure_path(path)?;

        let outcome = match map.get(&key) {
            Some(existing) if *existing == value => PatchOutcome::Unchanged,
            Some(_) => PatchOutcome::Replaced,
            None => PatchOutcome::Inserted,
        };
        if outcome != PatchOutcome::Unchanged {
            map.insert(key, value);
        }

        debug!(target: "document", "set {path}: {outcome}");
        Ok(outcome)
    }

    /// Deletes the final key of `path` if present.
    ///
    /// Missing intermediate keys, or intermediates that are not objects, mean there
    /// is nothing to remove; that is not an error. Sibling order is preserved.
    pub fn remove_path(&mut self, path: &KeyPath) -> PatchOutcome {
        let (parents, last) = path.split_last();

        let mut current = &mut self.root;
        for segment in parents {
            match current.get_mut(segment).and_then(Value::as_object_mut) {
                Some(next) => current = next,
                None => {
                    debug!(target: "document", "remove {path}: absent");
                    return PatchOutcome::Absent;
                }
            }
        }

        let outcome = match current.shift_remove(last) {
            Some(_) => PatchOutcome::Removed,
            None => PatchOutcome::Absent,
        };
        debug!(target: "document", "remove {path}: {outcome}");
        outcome
    }

    /// Applies one operation.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::PathConflict`] for a `Set` through a non-object value.
    pub fn apply(&mut self, operation: &PatchOperation) -> Result<PatchOutcome, PatchError> {
        match &operation.action {
            PatchAction::Set(value) => self.apply_patch(&operation.path, value.clone()),
            PatchAction::Remove => Ok(self.remove_path(&operation.path)),
        }
    }

    /// Applies operations in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first operation's error. Operations before it stay applied to
    /// this in-memory document; callers that must not persist partial results
    /// simply do not save.
    pub fn apply_all<'a, I>(&mut self, operations: I) -> Result<Vec<PatchOutcome>, PatchError>
    where
        I: IntoIterator<Item = &'a PatchOperation>,
    {
        operations.into_iter().map(|op| self.apply(op)).collect()
    }

    /// Verifies that no intermediate segment of `path` holds a non-object value.
    fn check_path(&self, path: &KeyPath) -> Result<(), PatchError> {
        let (parents, _) = path.split_last();
        let mut current = &self.root;
        for (depth, segment) in parents.iter().enumerate() {
            match current.get(segment) {
                None => return Ok(()),
                Some(Value::Object(next)) => current = next,
                Some(other) => {
                    return Err(PatchError::PathConflict {
                        segment: path.display_prefix(depth + 1),
                        found: json_type_name(other).to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Human-readable JSON type name for error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
