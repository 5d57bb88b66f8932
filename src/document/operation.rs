//! Patch operations: a key path plus what to do at it.

use super::KeyPath;
use crate::core::PatchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What a [`PatchOperation`] does at its key path.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchAction {
    /// Create missing intermediate objects and overwrite the final key.
    Set(Value),
    /// Delete the final key if present.
    Remove,
}

/// A single targeted edit of a configuration document.
///
/// Both actions are idempotent: `Set` is a plain overwrite (never a merge) and
/// `Remove` of an absent key does nothing.
///
/// In plan files an operation is written as a table with a `path` and exactly one
/// of `set = <value>` or `remove = true`:
///
/// ```toml
/// [[operations]]
/// path = ["mcpServers", "supabase"]
/// set = { type = "stdio", command = "npx" }
///
/// [[operations]]
/// path = "projects./home/me/app.mcpServers.supabase"
/// remove = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOperation", into = "RawOperation")]
pub struct PatchOperation {
    /// Where in the document the operation applies
    pub path: KeyPath,
    /// What to do there
    pub action: PatchAction,
}

impl PatchOperation {
    /// Operation that sets `path` to `value`.
    #[must_use]
    pub const fn set(path: KeyPath, value: Value) -> Self {
        Self {
            path,
            action: PatchAction::Set(value),
        }
    }

    /// Operation that removes `path`.
    #[must_use]
    pub const fn remove(path: KeyPath) -> Self {
        Self {
            path,
            action: PatchAction::Remove,
        }
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            PatchAction::Set(_) => write!(f, "set {}", self.path),
            PatchAction::Remove => write!(f, "remove {}", self.path),
        }
    }
}

/// On-disk shape of an operation in a plan file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOperation {
    path: KeyPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    set: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    remove: bool,
}

impl TryFrom<RawOperation> for PatchOperation {
    type Error = PatchError;

    fn try_from(raw: RawOperation) -> Result<Self, Self::Error> {
        match (raw.set, raw.remove) {
            (Some(value), false) => Ok(Self::set(raw.path, value)),
            (None, true) => Ok(Self::remove(raw.path)),
            (Some(_), true) => Err(PatchError::InvalidPlan {
                reason: format!("operation on '{}' has both 'set' and 'remove'", raw.path),
            }),
            (None, false) => Err(PatchError::InvalidPlan {
                reason: format!("operation on '{}' needs either 'set' or 'remove = true'", raw.path),
            }),
        }
    }
}

impl From<PatchOperation> for RawOperation {
    fn from(op: PatchOperation) -> Self {
        match op.action {
            PatchAction::Set(value) => Self {
                path: op.path,
                set: Some(value),
                remove: false,
            },
            PatchAction::Remove => Self {
                path: op.path,
                set: None,
                remove: true,
            },
        }
    }
}
