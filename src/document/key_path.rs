//! Key paths address a value inside a JSON document, from the root down.
//!
//! Two textual forms are accepted:
//!
//! - **dotted**: `mcpServers.supabase`; a literal `.` or `\` inside a key is escaped
//!   with a backslash (`a\.b` is the single key `a.b`)
//! - **JSON array**: `["projects", "/home/me/app", "mcpServers"]`, for keys that
//!   are awkward to escape
//!
//! Plan files accept either a string (parsed like the CLI argument) or an array of
//! strings.

use crate::core::PatchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-empty sequence of object keys from the document root to a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "KeyPathRepr", into = "Vec<String>")]
pub struct KeyPath {
    segments: Vec<String>,
}

/// Serialized forms accepted for a [`KeyPath`].
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyPathRepr {
    Text(String),
    Segments(Vec<String>),
}

impl TryFrom<KeyPathRepr> for KeyPath {
    type Error = PatchError;

    fn try_from(repr: KeyPathRepr) -> Result<Self, Self::Error> {
        match repr {
            KeyPathRepr::Text(text) => text.parse(),
            KeyPathRepr::Segments(segments) => Self::new(segments),
        }
    }
}

impl From<KeyPath> for Vec<String> {
    fn from(path: KeyPath) -> Self {
        path.segments
    }
}

impl KeyPath {
    /// Builds a key path from its segments.
    ///
    /// Segments are taken verbatim; no escaping is applied.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::EmptyKeyPath`] if there are no segments.
    pub fn new<I, S>(segments: I) -> Result<Self, PatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PatchError::EmptyKeyPath);
        }
        Ok(Self {
            segments,
        })
    }

    /// A single-segment path naming a top-level key.
    #[must_use]
    pub fn root(key: impl Into<String>) -> Self {
        Self {
            segments: vec![key.into()],
        }
    }

    /// All segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; present for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Splits into the parent segments and the final key.
    #[must_use]
    pub fn split_last(&self) -> (&[String], &str) {
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }

    /// The final key, i.e. the key that patches set or remove.
    #[must_use]
    pub fn last(&self) -> &str {
        self.split_last().1
    }

    /// Returns a new path with `key` appended.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self {
            segments,
        }
    }

    /// Returns the path of the parent mapping, or `None` for a single-segment path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (parents, _) = self.split_last();
        if parents.is_empty() {
            None
        } else {
            Some(Self {
                segments: parents.to_vec(),
            })
        }
    }

    /// Renders the first `len` segments in dotted form.
    #[must_use]
    pub fn display_prefix(&self, len: usize) -> String {
        self.segments.iter().take(len).map(|s| escape_segment(s)).collect::<Vec<_>>().join(".")
    }

    /// Parses the dotted form, honoring `\.` and `\\` escapes.
    fn parse_dotted(input: &str) -> Result<Self, PatchError> {
        let invalid = |reason: &str| PatchError::InvalidKeyPath {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = input.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped @ ('.' | '\\')) => current.push(escaped),
                    Some(other) => {
                        return Err(invalid(&format!("unknown escape '\\{other}'")));
                    }
                    None => return Err(invalid("trailing backslash")),
                },
                '.' => {
                    if current.is_empty() {
                        return Err(invalid("empty key; use the JSON array form for empty keys"));
                    }
                    segments.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            }
        }

        if current.is_empty() {
            return Err(invalid("empty key; use the JSON array form for empty keys"));
        }
        segments.push(current);

        Self::new(segments)
    }
}

impl FromStr for KeyPath {
    type Err = PatchError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PatchError::EmptyKeyPath);
        }

        if trimmed.starts_with('[') {
            let segments: Vec<String> =
                serde_json::from_str(trimmed).map_err(|e| PatchError::InvalidKeyPath {
                    input: input.to_string(),
                    reason: format!("expected a JSON array of strings: {e}"),
                })?;
            return Self::new(segments);
        }

        Self::parse_dotted(trimmed)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_prefix(self.segments.len()))
    }
}

fn escape_segment(segment: &str) -> String {
    segment.replace('\\', "\\\\").replace('.', "\\.")
}
