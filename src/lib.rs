//! mcp-patch - idempotent patching of Claude JSON configuration files
//!
//! Registers, updates and removes MCP (Model Context Protocol) server entries and
//! any other nested keys in `~/.claude.json` or `claude_desktop_config.json`,
//! while leaving every unrelated setting exactly as it was.
//!
//! # Architecture Overview
//!
//! A run is always the same pipeline: load the whole document, apply one or more
//! path-addressed operations in memory, write the document back atomically.
//!
//! - [`document`] - [`ConfigDocument`](document::ConfigDocument), key paths and
//!   patch operations (`ensure_path`, `apply_patch`, `remove_path`)
//! - [`patcher`] - the load → edit → save pipeline around one file, with create,
//!   backup and dry-run options
//! - [`config`] - TOML patch plans naming a document and its operations
//! - [`mcp`] - MCP server entries and their global or per-project placement
//! - [`cli`] - the `mcp-patch` command line
//! - [`core`] - error types and user-facing error rendering
//! - [`utils`] - atomic writes, file formats and home-directory paths
//!
//! # Patch Plan Example
//!
//! ```toml
//! document_path = "~/.claude.json"
//! backup = true
//!
//! [[operations]]
//! path = "mcpServers.supabase"
//! set = { type = "stdio", command = "npx", args = ["-y", "@supabase/mcp-server-supabase@latest"], env = { SUPABASE_ACCESS_TOKEN = "YOUR_SUPABASE_ACCESS_TOKEN_HERE" } }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! mcp-patch apply supabase.toml
//! mcp-patch mcp add supabase -e SUPABASE_ACCESS_TOKEN=sbp_... -- npx -y @supabase/mcp-server-supabase@latest
//! mcp-patch mcp migrate supabase --project /home/me/app
//! mcp-patch show mcpServers
//! ```
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use mcp_patch::mcp::{self, McpScope, McpServerEntry};
//! use mcp_patch::patcher::ConfigPatcher;
//!
//! # fn main() -> anyhow::Result<()> {
//! let entry = McpServerEntry::stdio("npx").with_args(["-y", "@supabase/mcp-server-supabase@latest"]);
//!
//! ConfigPatcher::new("/home/me/.claude.json")
//!     .with_backup(true)
//!     .edit(|doc| Ok(mcp::add_server(doc, &McpScope::Global, "supabase", &entry)?))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod mcp;
pub mod patcher;
pub mod utils;
