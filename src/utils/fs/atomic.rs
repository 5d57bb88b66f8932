//! Atomic file write operations using a temp-and-rename strategy.

use crate::utils::fs::ensure_dir;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`].
///
/// # Errors
///
/// Returns an error if any step of the atomic write fails.
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file.
///
/// 1. Writes the content to a temporary file in the target's directory
/// 2. Copies the permissions of the file being replaced, if any
/// 3. Syncs the temporary file to disk
/// 4. Renames it over the target path
///
/// The target therefore contains either the old content or the new content, never
/// a partial write. Parent directories are created when missing.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written, synced or
/// renamed into place.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".mcp-patch")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| {
            let platform_help = if crate::utils::platform::is_windows() {
                "On Windows: Check file permissions, path length, and that directory exists"
            } else {
                "Check file permissions and that directory exists"
            };

            format!("Failed to create temp file in: {}\n\n{}", parent.display(), platform_help)
        })?;

    // Keep restrictive modes (e.g. 0600 on a file holding tokens) across the rename
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to copy permissions from: {}", path.display()))?;
    }

    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
