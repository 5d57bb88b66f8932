//! Error handling for mcp-patch
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`PatchError`]) for the document layer, so callers can
//!    tell a load failure from a save failure or a conflicting key path
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and actionable
//!    suggestions for the CLI
//!
//! Application glue (plans, MCP helpers, commands) uses [`anyhow::Result`] with
//! `.with_context(..)`; [`user_friendly_error`] walks the whole error chain looking
//! for a [`PatchError`] before falling back to generic rendering.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcp_patch::core::{PatchError, user_friendly_error};
//!
//! let error = PatchError::DocumentNotFound {
//!     path: "/home/me/.claude.json".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for document patching.
///
/// # Error Categories
///
/// ## Loading (the `LoadError` family)
/// - [`DocumentNotFound`] - the configuration file does not exist
/// - [`DocumentReadFailed`] - the file exists but cannot be read
/// - [`DocumentParseFailed`] - the file is not valid JSON
/// - [`DocumentNotObject`] - the JSON root is not an object
///
/// ## Saving (the `SaveError` family)
/// - [`DocumentWriteFailed`] - the destination cannot be written
///
/// ## Patching
/// - [`EmptyKeyPath`], [`InvalidKeyPath`] - malformed key paths
/// - [`PathConflict`] - an intermediate key holds a non-object value
///
/// ## Plans and MCP entries
/// - [`InvalidPlan`], [`ProjectNotFound`], [`EntryNotFound`], [`InvalidEntry`]
///
/// [`DocumentNotFound`]: PatchError::DocumentNotFound
/// [`DocumentReadFailed`]: PatchError::DocumentReadFailed
/// [`DocumentParseFailed`]: PatchError::DocumentParseFailed
/// [`DocumentNotObject`]: PatchError::DocumentNotObject
/// [`DocumentWriteFailed`]: PatchError::DocumentWriteFailed
/// [`EmptyKeyPath`]: PatchError::EmptyKeyPath
/// [`InvalidKeyPath`]: PatchError::InvalidKeyPath
/// [`PathConflict`]: PatchError::PathConflict
/// [`InvalidPlan`]: PatchError::InvalidPlan
/// [`ProjectNotFound`]: PatchError::ProjectNotFound
/// [`EntryNotFound`]: PatchError::EntryNotFound
/// [`InvalidEntry`]: PatchError::InvalidEntry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// Configuration file does not exist
    #[error("Configuration file not found: {path}")]
    DocumentNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Configuration file exists but could not be read
    #[error("Failed to read configuration file {path}: {reason}")]
    DocumentReadFailed {
        /// Path of the unreadable file
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// Configuration file is not valid JSON
    #[error("Invalid JSON in {path}: {reason}")]
    DocumentParseFailed {
        /// Path of the malformed file
        path: String,
        /// Parser message including line and column
        reason: String,
    },

    /// Configuration file parsed, but its root is not a JSON object
    #[error("Configuration root in {path} is a {found}, expected an object")]
    DocumentNotObject {
        /// Path of the offending file
        path: String,
        /// JSON type that was found at the root
        found: String,
    },

    /// Configuration file could not be written
    #[error("Failed to write configuration file {path}: {reason}")]
    DocumentWriteFailed {
        /// Destination path
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// A key path with no segments was supplied
    #[error("Key path must contain at least one key")]
    EmptyKeyPath,

    /// A textual key path could not be parsed
    #[error("Invalid key path '{input}': {reason}")]
    InvalidKeyPath {
        /// Text as supplied by the user
        input: String,
        /// What is wrong with it
        reason: String,
    },

    /// An intermediate key exists but does not hold an object
    ///
    /// Patching never replaces an intermediate value, since that would discard
    /// whatever data lives there.
    #[error("Cannot descend into '{segment}': it holds a {found}, not an object")]
    PathConflict {
        /// Key path up to and including the conflicting key
        segment: String,
        /// JSON type found at that key
        found: String,
    },

    /// A patch plan is structurally invalid
    #[error("Invalid patch plan: {reason}")]
    InvalidPlan {
        /// Description of the problem
        reason: String,
    },

    /// A project-scoped MCP operation named a project the document does not know
    #[error("Project '{project}' not found in configuration")]
    ProjectNotFound {
        /// Project key under `projects`
        project: String,
    },

    /// An entry that must exist for the operation is missing
    #[error("No entry at '{path}'")]
    EntryNotFound {
        /// Key path of the missing entry
        path: String,
    },

    /// An MCP server entry is missing required fields
    #[error("Invalid MCP server entry: {reason}")]
    InvalidEntry {
        /// Description of the problem
        reason: String,
    },

    /// The home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// Catch-all for messages that have no dedicated variant
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl PatchError {
    /// Whether this error belongs to the load family (missing, unreadable, malformed).
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound { .. }
                | Self::DocumentReadFailed { .. }
                | Self::DocumentParseFailed { .. }
                | Self::DocumentNotObject { .. }
        )
    }

    /// Whether this error belongs to the save family.
    #[must_use]
    pub const fn is_save_error(&self) -> bool {
        matches!(self, Self::DocumentWriteFailed { .. })
    }
}

/// Error context wrapper that pairs a [`PatchError`] with user-facing guidance.
///
/// ```rust,no_run
/// use mcp_patch::core::{ErrorContext, PatchError};
///
/// let context = ErrorContext::new(PatchError::HomeDirNotFound)
///     .with_suggestion("Pass the configuration file explicitly with --file")
///     .with_details("HOME (or USERPROFILE on Windows) is not set");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PatchError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PatchError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes, in order:
/// - a [`PatchError`] anywhere in the error chain, with tailored suggestions
/// - a [`std::io::Error`] anywhere in the chain, with filesystem guidance
/// - anything else, rendered with its full `Caused by:` chain
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(patch_error) = error.chain().find_map(|cause| cause.downcast_ref::<PatchError>()) {
        return create_error_context(patch_error.clone());
    }

    if let Some(io_error) = error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>()) {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PatchError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check the ownership and permissions of the file and its directory")
                .with_details("The operating system refused access to a file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PatchError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full chain for diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PatchError::Other {
        message,
    })
}

/// Map each [`PatchError`] variant to tailored details and suggestions.
fn create_error_context(error: PatchError) -> ErrorContext {
    let (suggestion, details): (Option<String>, Option<String>) = match &error {
        PatchError::DocumentNotFound { path } => (
            Some("Check the path, or pass --create to start from an empty document".to_string()),
            Some(format!("Nothing was written; {path} does not exist")),
        ),

        PatchError::DocumentReadFailed { .. } => (
            Some(
                match cfg!(windows) {
                    true => "Check the file permissions in File Explorer",
                    false => "Check the file permissions with 'ls -la'",
                }
                .to_string(),
            ),
            None,
        ),

        PatchError::DocumentParseFailed { .. } => (
            Some("Fix the JSON syntax (trailing commas and comments are not allowed) and run again".to_string()),
            Some("The file was left untouched".to_string()),
        ),

        PatchError::DocumentNotObject { .. } => (
            None,
            Some("Only documents whose top level is a JSON object can be patched".to_string()),
        ),

        PatchError::DocumentWriteFailed { .. } => (
            Some("Check that the destination directory is writable and the disk is not full".to_string()),
            Some("The original file is unchanged; the new content was never committed".to_string()),
        ),

        PatchError::PathConflict { segment, .. } => (
            Some(format!("Remove or rename '{segment}' first, or choose a different key path")),
            Some("Intermediate values are never replaced, to avoid losing sibling data".to_string()),
        ),

        PatchError::InvalidKeyPath { .. } | PatchError::EmptyKeyPath => (
            Some(
                "Use a dotted path like mcpServers.supabase (escape literal dots as \\.) \
                 or a JSON array like '[\"projects\", \"/home/me/app\"]'"
                    .to_string(),
            ),
            None,
        ),

        PatchError::ProjectNotFound { .. } => (
            Some("Run 'mcp-patch mcp list' to see the known projects, or omit --project for global scope".to_string()),
            Some("Projects are registered by Claude Code the first time it opens a directory".to_string()),
        ),

        PatchError::InvalidEntry { .. } => {
            (Some("Pass the server command after `--`, or --url for http and sse servers".to_string()), None)
        }

        PatchError::HomeDirNotFound => (
            Some("Pass the configuration file explicitly with --file".to_string()),
            Some(
                match cfg!(windows) {
                    true => "The USERPROFILE environment variable is not set",
                    false => "The HOME environment variable is not set",
                }
                .to_string(),
            ),
        ),

        _ => (None, None),
    };

    ErrorContext {
        error,
        suggestion,
        details,
    }
}
