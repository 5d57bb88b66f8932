//! Core error types shared by every layer of mcp-patch.
//!
//! - [`PatchError`] - typed failures of loading, patching and saving documents
//! - [`ErrorContext`] - an error plus user-facing details and suggestions
//! - [`user_friendly_error`] - converts any [`anyhow::Error`] for CLI display

pub mod error;

pub use error::{ErrorContext, PatchError, user_friendly_error};
