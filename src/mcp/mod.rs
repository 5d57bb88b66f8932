//! MCP (Model Context Protocol) server entries in Claude configuration files.
//!
//! Claude Code keeps MCP servers in two places inside `~/.claude.json`:
//!
//! - **global**: `mcpServers.<name>`, available in every project
//! - **project**: `projects.<path>.mcpServers.<name>`, only for one directory
//!
//! The helpers here translate "add this server", "remove it" or "move it from a
//! project to global scope" into key-path patches on a [`ConfigDocument`]. They
//! only touch the entry they name; every other server, project and setting in the
//! file is left as it was.

mod models;


pub use models::McpServerEntry;

use crate::core::PatchError;
use crate::document::{ConfigDocument, KeyPath, PatchOutcome};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Top-level key holding global MCP servers.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Top-level key holding per-project settings.
pub const PROJECTS_KEY: &str = "projects";

/// Where an MCP server entry lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpScope {
    /// `mcpServers` at the document root
    Global,
    /// `projects.<path>.mcpServers`
    Project(String),
}

impl McpScope {
    /// Scope for `project`, or global when `None`.
    #[must_use]
    pub fn from_project(project: Option<&str>) -> Self {
        project.map_or(Self::Global, |p| Self::Project(p.to_string()))
    }

    /// Key path of the `mcpServers` mapping for this scope.
    #[must_use]
    pub fn servers_path(&self) -> KeyPath {
        match self {
            Self::Global => KeyPath::root(MCP_SERVERS_KEY),
            Self::Project(project) => project_path(project).child(MCP_SERVERS_KEY),
        }
    }

    /// Key path of the server entry `name` in this scope.
    #[must_use]
    pub fn entry_path(&self, name: &str) -> KeyPath {
        self.servers_path().child(name)
    }
}

impl fmt::Display for McpScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Project(project) => write!(f, "project {project}"),
        }
    }
}

/// One server found by [`list_servers`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServerListing {
    /// Scope the entry was found in
    pub scope: McpScope,
    /// Server name
    pub name: String,
    /// The stored entry, exactly as in the document
    pub entry: Value,
}

/// What [`migrate_to_global`] did on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Outcome of writing the global entry
    pub copied: PatchOutcome,
    /// Outcome of removing the project entry
    pub removed: PatchOutcome,
}

fn project_path(project: &str) -> KeyPath {
    KeyPath::root(PROJECTS_KEY).child(project)
}

/// Writes `entry` as server `name` in `scope`, replacing any previous entry.
///
/// Global scope creates `mcpServers` when it is missing. Project scope requires
/// the project to be known already; Claude Code registers a project the first
/// time it is opened, so an unknown project usually means a typo in the path.
///
/// # Errors
///
/// - [`PatchError::InvalidEntry`] if `entry` fails validation
/// - [`PatchError::ProjectNotFound`] if the project is not in the document
/// - [`PatchError::PathConflict`] if a key along the way is not an object
pub fn add_server(
    document: &mut ConfigDocument,
    scope: &McpScope,
    name: &str,
    entry: &McpServerEntry,
) -> Result<PatchOutcome, PatchError> {
    entry.validate()?;

    if let McpScope::Project(project) = scope {
        if document.get(&project_path(project)).is_none_or(|value| !value.is_object()) {
            return Err(PatchError::ProjectNotFound {
                project: project.clone(),
            });
        }
    }

    let outcome = document.apply_patch(&scope.entry_path(name), entry.to_value()?)?;
    debug!(target: "mcp", "add {name} ({scope}): {outcome}");
    Ok(outcome)
}

/// Removes server `name` from `scope`; a missing entry is not an error.
pub fn remove_server(document: &mut ConfigDocument, scope: &McpScope, name: &str) -> PatchOutcome {
    let outcome = document.remove_path(&scope.entry_path(name));
    debug!(target: "mcp", "remove {name} ({scope}): {outcome}");
    outcome
}

/// Moves server `name` from `project` to global scope.
///
/// With `replacement`, that entry is written globally instead of the project's
/// copy, and the project entry is removed whether or not it existed. Without it,
/// the project entry is copied verbatim and must exist.
///
/// # Errors
///
/// - [`PatchError::EntryNotFound`] if there is no project entry and no replacement
/// - [`PatchError::InvalidEntry`] if `replacement` fails validation
/// - [`PatchError::PathConflict`] if `mcpServers` is not an object
pub fn migrate_to_global(
    document: &mut ConfigDocument,
    project: &str,
    name: &str,
    replacement: Option<&McpServerEntry>,
) -> Result<Migration, PatchError> {
    let source = McpScope::Project(project.to_string()).entry_path(name);

    let value = match replacement {
        Some(entry) => {
            entry.validate()?;
            entry.to_value()?
        }
        None => document.get(&source).cloned().ok_or_else(|| PatchError::EntryNotFound {
            path: source.to_string(),
        })?,
    };

    let copied = document.apply_patch(&McpScope::Global.entry_path(name), value)?;
    let removed = document.remove_path(&source);

    debug!(target: "mcp", "migrate {name} from {project}: copied {copied}, removed {removed}");
    Ok(Migration {
        copied,
        removed,
    })
}

/// Every MCP server in the document: global entries first, then each project's,
/// in document order.
///
/// Mappings that are not objects are skipped.
#[must_use]
pub fn list_servers(document: &ConfigDocument) -> Vec<ServerListing> {
    let mut listings = Vec::new();

    let mut collect = |scope: McpScope, servers: Option<&Value>| {
        if let Some(Value::Object(servers)) = servers {
            for (name, entry) in servers {
                listings.push(ServerListing {
                    scope: scope.clone(),
                    name: name.clone(),
                    entry: entry.clone(),
                });
            }
        }
    };

    collect(McpScope::Global, document.root().get(MCP_SERVERS_KEY));

    if let Some(Value::Object(projects)) = document.root().get(PROJECTS_KEY) {
        for (project, settings) in projects {
            collect(McpScope::Project(project.clone()), settings.get(MCP_SERVERS_KEY));
        }
    }

    listings
}

/// Project keys known to the document.
#[must_use]
pub fn list_projects(document: &ConfigDocument) -> Vec<String> {
    match document.root().get(PROJECTS_KEY) {
        Some(Value::Object(projects)) => projects.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
