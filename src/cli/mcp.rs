//! MCP server management commands.
//!
//! ```bash
//! # Global stdio server
//! mcp-patch mcp add supabase -e SUPABASE_ACCESS_TOKEN=sbp_... -- npx -y @supabase/mcp-server-supabase@latest
//!
//! # Remote server for a single project
//! mcp-patch mcp add github --project /home/me/app --url https://api.githubcopilot.com/mcp/
//!
//! # Promote a project server to global scope
//! mcp-patch mcp migrate supabase --project /home/me/app
//! ```

use super::common::{DocumentArgs, Reporter, parse_key_value};
use crate::mcp::{self, McpScope, McpServerEntry};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::json;

/// Manage MCP server entries.
#[derive(Debug, Args)]
pub struct McpCommand {
    /// MCP operation to perform
    #[command(subcommand)]
    subcommand: McpSubcommand,
}

#[derive(Debug, Subcommand)]
enum McpSubcommand {
    /// Add or replace an MCP server entry.
    Add {
        /// Server name, the key under `mcpServers`
        name: String,

        /// Add to this project (a key under `projects`) instead of globally
        #[arg(long, value_name = "PROJECT")]
        project: Option<String>,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Remove an MCP server entry; succeeds when it is already absent.
    Remove {
        /// Server name
        name: String,

        /// Remove from this project instead of globally
        #[arg(long, value_name = "PROJECT")]
        project: Option<String>,
    },

    /// Move a project-scoped server to global scope.
    ///
    /// The project's entry is copied to `mcpServers` and then removed from the
    /// project. Entry options replace the copied entry with a new one.
    Migrate {
        /// Server name
        name: String,

        /// Project currently holding the entry
        #[arg(long, value_name = "PROJECT")]
        project: String,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// List global and project-scoped MCP servers.
    List {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options describing a server entry.
#[derive(Debug, Clone, Default, Args)]
struct EntryArgs {
    /// Transport: stdio, http or sse (inferred from --url or COMMAND when omitted)
    #[arg(long = "type", value_name = "TYPE")]
    transport: Option<String>,

    /// Environment variable for the server process (repeatable)
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    env: Vec<(String, String)>,

    /// Write an `env` object even when no --env is given
    #[arg(long)]
    empty_env: bool,

    /// URL of a remote (http or sse) server
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// HTTP header for a remote server (repeatable)
    #[arg(long = "header", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    headers: Vec<(String, String)>,

    /// Command and arguments that start a stdio server, after `--`
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

impl EntryArgs {
    fn is_empty(&self) -> bool {
        self.transport.is_none()
            && self.env.is_empty()
            && !self.empty_env
            && self.url.is_none()
            && self.headers.is_empty()
            && self.command.is_empty()
    }

    fn to_entry(&self) -> McpServerEntry {
        let mut entry = McpServerEntry {
            url: self.url.clone(),
            ..McpServerEntry::default()
        };

        if let Some((command, args)) = self.command.split_first() {
            entry.command = Some(command.clone());
            entry.args = args.to_vec();
        }

        entry.r#type = self.transport.clone().or_else(|| {
            if entry.url.is_some() {
                Some("http".to_string())
            } else if entry.command.is_some() {
                Some("stdio".to_string())
            } else {
                None
            }
        });

        if self.empty_env {
            entry = entry.with_empty_env();
        }
        for (key, value) in &self.env {
            entry = entry.with_env(key, value);
        }
        for (key, value) in &self.headers {
            entry = entry.with_header(key, value);
        }
        entry
    }
}

impl McpCommand {
    /// Runs the selected MCP operation.
    ///
    /// # Errors
    ///
    /// Returns load, validation, MCP or save errors.
    pub fn execute(self, options: &DocumentArgs, reporter: Reporter) -> Result<()> {
        match self.subcommand {
            McpSubcommand::Add {
                name,
                project,
                entry,
            } => add(options, reporter, &name, project.as_deref(), &entry),
            McpSubcommand::Remove {
                name,
                project,
            } => remove(options, reporter, &name, project.as_deref()),
            McpSubcommand::Migrate {
                name,
                project,
                entry,
            } => migrate(options, reporter, &name, &project, &entry),
            McpSubcommand::List {
                json,
            } => list(options, json),
        }
    }
}

fn warn_placeholders(reporter: Reporter, name: &str, entry: &McpServerEntry) {
    for key in entry.placeholder_env_keys() {
        reporter.warn(format!("{key} for '{name}' still holds a placeholder; replace it with the real value"));
    }
}

fn add(
    options: &DocumentArgs,
    reporter: Reporter,
    name: &str,
    project: Option<&str>,
    entry_args: &EntryArgs,
) -> Result<()> {
    let scope = McpScope::from_project(project);
    let entry = entry_args.to_entry();

    let edited = options.patcher()?.edit(|document| {
        mcp::add_server(document, &scope, name, &entry)
            .with_context(|| format!("Failed to add MCP server '{name}' ({scope})"))
    })?;

    warn_placeholders(reporter, name, &entry);
    reporter.finish(
        &edited,
        &format!("Set {}", scope.entry_path(name)),
        edited.value.is_change(),
    )
}

fn remove(options: &DocumentArgs, reporter: Reporter, name: &str, project: Option<&str>) -> Result<()> {
    let scope = McpScope::from_project(project);

    let edited = options.patcher()?.edit(|document| Ok(mcp::remove_server(document, &scope, name)))?;

    reporter.finish(
        &edited,
        &format!("Removed {}", scope.entry_path(name)),
        edited.value.is_change(),
    )
}

fn migrate(
    options: &DocumentArgs,
    reporter: Reporter,
    name: &str,
    project: &str,
    entry_args: &EntryArgs,
) -> Result<()> {
    let replacement = (!entry_args.is_empty()).then(|| entry_args.to_entry());

    let edited = options.patcher()?.edit(|document| {
        mcp::migrate_to_global(document, project, name, replacement.as_ref())
            .with_context(|| format!("Failed to migrate MCP server '{name}' from {project}"))
    })?;

    if let Some(entry) = &replacement {
        warn_placeholders(reporter, name, entry);
    }
    let changed = edited.value.copied.is_change() || edited.value.removed.is_change();
    reporter.finish(
        &edited,
        &format!("Moved {name} from project {project} to {}", McpScope::Global.entry_path(name)),
        changed,
    )
}

fn list(options: &DocumentArgs, as_json: bool) -> Result<()> {
    let patcher = options.patcher()?;
    let document = patcher.load()?;
    let servers = mcp::list_servers(&document);

    if as_json {
        let rendered: Vec<_> = servers
            .iter()
            .map(|server| {
                let project = match &server.scope {
                    McpScope::Global => None,
                    McpScope::Project(project) => Some(project.as_str()),
                };
                json!({"name": server.name, "project": project, "entry": server.entry})
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    if servers.is_empty() {
        println!("No MCP servers configured in {}", patcher.path().display());
    } else {
        println!("MCP servers in {}:", patcher.path().display());
    }

    let mut current: Option<&McpScope> = None;
    for server in &servers {
        if current != Some(&server.scope) {
            println!();
            println!("  {}", server.scope.to_string().bold());
            current = Some(&server.scope);
        }
        let detail = server
            .entry
            .get("command")
            .or_else(|| server.entry.get("url"))
            .and_then(|value| value.as_str())
            .unwrap_or_default();
        let transport = server.entry.get("type").and_then(|value| value.as_str()).unwrap_or("-");
        println!("    {} {} [{}] {}", "•".cyan(), server.name, transport, detail.dimmed());
    }

    let projects = mcp::list_projects(&document);
    if !projects.is_empty() {
        println!();
        println!("Known projects: {}", projects.join(", "));
    }
    Ok(())
}
