//! File system utilities for configuration files.
//!
//! - **Atomic writes**: content lands in a temporary sibling file that is synced and
//!   renamed over the target, so readers never observe a half-written document
//! - **Formats**: JSON and TOML helpers with path-aware error context
//! - **Backups**: a `.bak` copy of the previous content before overwriting

pub mod atomic;
pub mod formats;

pub use atomic::{atomic_write, safe_write};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensures a directory exists, creating it and all parents if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, or if `path` exists but is
/// not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            let platform_help = if crate::utils::platform::is_windows() {
                "On Windows: Check that the path length is < 260 chars or that long path support is enabled"
            } else {
                "Check directory permissions and path validity"
            };

            format!("Failed to create directory: {}\n\n{}", path.display(), platform_help)
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Returns the backup location for `path`: the same file name with `.bak` appended.
///
/// `/home/me/.claude.json` backs up to `/home/me/.claude.json.bak`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// Copies an existing file to its [`backup_path`], replacing any older backup.
///
/// Returns `Ok(None)` when `path` does not exist yet, since there is nothing to keep.
///
/// # Errors
///
/// Returns an error if the copy fails.
pub fn create_backup(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let backup = backup_path(path);
    fs::copy(path, &backup).with_context(|| {
        format!("Failed to create backup of {} at {}", path.display(), backup.display())
    })?;
    tracing::debug!(target: "fs", "Backed up {} to {}", path.display(), backup.display());

    Ok(Some(backup))
}
