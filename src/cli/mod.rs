//! Command-line interface for mcp-patch.
//!
//! Each command lives in its own module with its own argument struct and an
//! `execute` method. Options that select and persist the document (`--file`,
//! `--target`, `--create`, `--backup`, `--dry-run`) are global and shared by every
//! command through [`DocumentArgs`].
//!
//! # Commands
//!
//! - `apply` - run a TOML patch plan
//! - `set` / `remove` - edit one key path
//! - `show` - print the document or one value
//! - `mcp add|remove|migrate|list` - manage MCP server entries
//!
//! # Examples
//!
//! ```bash
//! # Register a server globally in ~/.claude.json, keeping a backup
//! mcp-patch --backup mcp add supabase -e SUPABASE_ACCESS_TOKEN=sbp_... -- npx -y @supabase/mcp-server-supabase@latest
//!
//! # Same edit as a raw key-path patch against the desktop configuration
//! mcp-patch --target desktop --create set mcpServers.supabase '{"type": "stdio", "command": "npx"}'
//!
//! # Preview a plan without writing
//! mcp-patch --dry-run apply supabase.toml
//! ```

mod apply;
mod common;
mod edit;
mod mcp;

pub use common::{DocumentArgs, Reporter, Target};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Idempotent, path-addressed patching of Claude JSON configuration files.
#[derive(Debug, Parser)]
#[command(
    name = "mcp-patch",
    about = "Patch Claude configuration files: add, update and remove MCP servers and other keys",
    version,
    long_about = None
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    document: DocumentArgs,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors and requested output
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a TOML patch plan
    Apply(apply::ApplyCommand),

    /// Set a key path to a JSON value
    Set(edit::SetCommand),

    /// Remove a key path
    Remove(edit::RemoveCommand),

    /// Print the document or the value at a key path
    Show(edit::ShowCommand),

    /// Manage MCP server entries
    Mcp(mcp::McpCommand),
}

impl Cli {
    /// Default log filter for the verbosity flags; `RUST_LOG` overrides it.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Installs the stderr tracing subscriber.
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .without_time()
            .try_init();
    }

    /// Runs the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; the binary renders it and exits with status 1.
    pub fn execute(self) -> Result<()> {
        self.init_logging();
        let reporter = Reporter::new(self.quiet);

        match self.command {
            Commands::Apply(cmd) => cmd.execute(&self.document, reporter),
            Commands::Set(cmd) => cmd.execute(&self.document, reporter),
            Commands::Remove(cmd) => cmd.execute(&self.document, reporter),
            Commands::Show(cmd) => cmd.execute(&self.document),
            Commands::Mcp(cmd) => cmd.execute(&self.document, reporter),
        }
    }
}
