use crate::core::PatchError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Individual MCP server entry as Claude stores it under `mcpServers.<name>`.
///
/// Supports both command-based (`stdio`) and HTTP (`http`, `sse`) transports.
/// Fields serialize in the order Claude writes them, and empty fields are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct McpServerEntry {
    /// Transport type: `stdio`, `http` or `sse`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// The command to execute to start the server (command-based servers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Arguments to pass to the command (command-based servers)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment variables for the server process, often holding access tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Map<String, Value>>,

    /// Server URL (HTTP-based servers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// HTTP headers (HTTP-based servers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
}

impl McpServerEntry {
    /// A `stdio` entry running `command`.
    #[must_use]
    pub fn stdio(command: impl Into<String>) -> Self {
        Self {
            r#type: Some("stdio".to_string()),
            command: Some(command.into()),
            ..Self::default()
        }
    }

    /// An entry for an HTTP transport (`http` or `sse`) at `url`.
    #[must_use]
    pub fn remote(transport: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            r#type: Some(transport.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Appends command arguments.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets one environment variable, keeping insertion order.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.get_or_insert_with(Map::new).insert(key.into(), Value::String(value.into()));
        self
    }

    /// Writes an `env` object even when no variable is set.
    #[must_use]
    pub fn with_empty_env(mut self) -> Self {
        self.env.get_or_insert_with(Map::new);
        self
    }

    /// Sets one HTTP header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(Map::new).insert(key.into(), Value::String(value.into()));
        self
    }

    /// Checks that the transport has what it needs to start.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidEntry`] when a `stdio` entry has no command, an
    /// `http`/`sse` entry has no URL, an unknown transport is named, or the entry
    /// has neither command nor URL.
    pub fn validate(&self) -> Result<(), PatchError> {
        let invalid = |reason: &str| PatchError::InvalidEntry {
            reason: reason.to_string(),
        };

        match self.r#type.as_deref() {
            Some("stdio") if self.command.is_none() => {
                Err(invalid("stdio servers require a command"))
            }
            Some("http" | "sse") if self.url.is_none() => {
                Err(invalid("http and sse servers require a url"))
            }
            Some("stdio" | "http" | "sse") => Ok(()),
            Some(other) => Err(invalid(&format!(
                "unknown transport '{other}' (expected stdio, http or sse)"
            ))),
            None if self.command.is_none() && self.url.is_none() => {
                Err(invalid("an entry needs a command or a url"))
            }
            None => Ok(()),
        }
    }

    /// Converts to the JSON value stored in the document.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidEntry`] if serialization fails.
    pub fn to_value(&self) -> Result<Value, PatchError> {
        serde_json::to_value(self).map_err(|e| PatchError::InvalidEntry {
            reason: e.to_string(),
        })
    }

    /// Names of environment variables still holding a placeholder such as
    /// `YOUR_SUPABASE_ACCESS_TOKEN_HERE` instead of a real value.
    #[must_use]
    pub fn placeholder_env_keys(&self) -> Vec<String> {
        self.env
            .iter()
            .flatten()
            .filter(|(_, value)| value.as_str().is_some_and(is_placeholder))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// Whether `value` looks like an unfilled template value.
fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || (value.starts_with("YOUR_") && value.ends_with("_HERE"))
        || (value.starts_with('<') && value.ends_with('>'))
}
