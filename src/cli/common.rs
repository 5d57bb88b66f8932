//! Options and output helpers shared by every command.

use crate::patcher::{ConfigPatcher, Edited, WriteMode};
use crate::utils::platform::{claude_config_path, claude_desktop_config_path, resolve_path};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

/// Well-known configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Claude Code: `~/.claude.json`
    #[default]
    Claude,
    /// Claude desktop: `~/.claude/claude_desktop_config.json`
    Desktop,
}

impl Target {
    /// Default location of this target's configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path(self) -> Result<PathBuf> {
        match self {
            Self::Claude => claude_config_path(),
            Self::Desktop => claude_desktop_config_path(),
        }
    }
}

/// Which document to edit and how to persist it.
#[derive(Debug, Clone, Default, Args)]
pub struct DocumentArgs {
    /// Configuration file to edit (overrides --target)
    #[arg(short, long, global = true, env = "MCP_PATCH_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Well-known configuration file to edit when --file is not given
    #[arg(long, global = true, value_enum, default_value_t = Target::Claude)]
    pub target: Target,

    /// Start from an empty document if the file does not exist
    #[arg(long, global = true)]
    pub create: bool,

    /// Copy the current file to <file>.bak before writing
    #[arg(long, global = true)]
    pub backup: bool,

    /// Show the resulting document without writing it
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl DocumentArgs {
    /// Path of the document these options select.
    ///
    /// `--file` wins, with `~` and `$VAR` expanded; otherwise the target's
    /// default location is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be expanded or the home directory is
    /// unknown.
    pub fn document_path(&self) -> Result<PathBuf> {
        match &self.file {
            Some(file) => resolve_path(&file.to_string_lossy())
                .with_context(|| format!("Failed to resolve --file {}", file.display())),
            None => self.target.default_path(),
        }
    }

    /// The write mode these options select.
    #[must_use]
    pub const fn write_mode(&self) -> WriteMode {
        if self.dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Write
        }
    }

    /// A patcher for the selected document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document path cannot be determined.
    pub fn patcher(&self) -> Result<ConfigPatcher> {
        Ok(ConfigPatcher::new(self.document_path()?)
            .with_create(self.create)
            .with_backup(self.backup)
            .with_mode(self.write_mode()))
    }
}

/// Prints user-facing status lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    /// A reporter that stays silent when `quiet` is set.
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self {
            quiet,
        }
    }

    /// Prints one line unless quiet.
    pub fn line(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    /// Prints a yellow warning line unless quiet.
    pub fn warn(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", "⚠️".yellow(), message.as_ref().yellow());
        }
    }

    /// Reports the result of an edit.
    ///
    /// `summary` describes what was done, e.g. `Set mcpServers.supabase`. When
    /// nothing on disk changed in meaning, the restart hint is omitted. A dry run
    /// prints the resulting document instead, even when quiet.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be rendered.
    pub fn finish<T>(&self, edited: &Edited<T>, summary: &str, changed: bool) -> Result<()> {
        if !edited.written {
            self.line(format!(
                "{} Dry run: {} in {} (not written)",
                "🔍".cyan(),
                summary,
                edited.path.display()
            ));
            print!("{}", edited.document.to_pretty_string()?);
            return Ok(());
        }

        if let Some(backup) = &edited.backup {
            self.line(format!("{} Backup saved to {}", "📦".cyan(), backup.display()));
        }

        if changed {
            self.line(format!("{} {} in {}", "✅".green(), summary, edited.path.display()));
            self.line(format!("{} Restart Claude Code for the changes to take effect", "🔄".blue()));
        } else {
            self.line(format!(
                "{} {} in {} (already up to date)",
                "✓".green(),
                summary,
                edited.path.display()
            ));
        }
        Ok(())
    }
}

/// Parses a `KEY=VALUE` argument.
///
/// # Errors
///
/// Returns a message when there is no `=` or the key is empty.
pub fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{input}'")),
    }
}
