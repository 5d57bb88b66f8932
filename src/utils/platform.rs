//! Platform-specific path resolution.
//!
//! Claude keeps its configuration under the user's home directory on every
//! platform; only the way the home directory is discovered differs:
//!
//! - **Windows**: `%USERPROFILE%`
//! - **Unix/Linux/macOS**: `$HOME`

use crate::core::PatchError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Returns true when compiled for Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the current user's home directory.
///
/// # Errors
///
/// Returns [`PatchError::HomeDirNotFound`] (wrapped with platform help) when the
/// home directory environment variable is not set.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(PatchError::HomeDirNotFound).with_context(|| {
        if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        }
    })
}

/// Default location of the Claude Code configuration: `<home>/.claude.json`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn claude_config_path() -> Result<PathBuf> {
    Ok(get_home_dir()?.join(".claude.json"))
}

/// Default location of the desktop configuration:
/// `<home>/.claude/claude_desktop_config.json`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn claude_desktop_config_path() -> Result<PathBuf> {
    Ok(get_home_dir()?.join(".claude").join("claude_desktop_config.json"))
}

/// Expands a leading `~` and `$VAR` / `${VAR}` references in a path.
///
/// Only `~` and `~/...` are supported for tilde expansion; `~user` forms are
/// rejected rather than guessed at.
///
/// # Errors
///
/// Returns an error if the home directory is needed but unknown, if `~user` syntax
/// is used, or if a referenced environment variable is not set.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = if path == "~" {
        get_home_dir()?
    } else if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        get_home_dir()?.join(stripped)
    } else if path.starts_with('~') {
        return Err(anyhow::anyhow!(
            "Invalid path: {path}\n\n\
            Tilde expansion only supports '~/' for the home directory.\n\
            Use '~/' followed by a relative path, like '~/.claude.json'"
        ));
    } else {
        PathBuf::from(path)
    };

    let path_str = expanded.to_string_lossy();
    let expanded_str = shellexpand::env(&path_str)
        .with_context(|| format!("Failed to expand environment variables in path: {path}"))?;

    Ok(PathBuf::from(expanded_str.as_ref()))
}

/// Resolves `path` against `base` unless it is already absolute.
#[must_use]
pub fn resolve_relative_to(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
