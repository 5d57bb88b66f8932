//! Reading and writing structured data files.
//!
//! All write operations go through [`super::atomic::safe_write`].

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a text file with path context on failure.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Serializes `data` as JSON and writes it atomically.
///
/// Pretty output uses two-space indentation and ends with a newline, matching what
/// editors and the Claude tools write themselves.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json_file<T>(path: &Path, data: &T, pretty: bool) -> Result<()>
where
    T: serde::Serialize,
{
    let mut json = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };
    json.push('\n');

    super::safe_write(path, &json)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))
}

/// Reads and parses a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_toml_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_text_file(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}
