//! Run a TOML patch plan.

use super::common::{DocumentArgs, Reporter};
use crate::config::PatchPlan;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Apply every operation in a patch plan file.
///
/// The plan names its own document; `--file` and `--target` are not consulted.
/// `--create` and `--backup` are enabled if either the plan or the command line
/// asks for them.
#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Patch plan (TOML) to apply
    #[arg(value_name = "PLAN")]
    plan: PathBuf,
}

impl ApplyCommand {
    /// Loads the plan, applies it and reports each operation.
    ///
    /// # Errors
    ///
    /// Returns plan, load, operation or save errors; nothing is written on error.
    pub fn execute(self, options: &DocumentArgs, reporter: Reporter) -> Result<()> {
        let mut plan = PatchPlan::load(&self.plan)?;
        plan.create |= options.create;
        plan.backup |= options.backup;

        let edited = plan.run(options.write_mode())?;

        for (operation, outcome) in plan.operations.iter().zip(&edited.value) {
            let marker = if outcome.is_change() { "•".green() } else { "•".dimmed() };
            reporter.line(format!("  {marker} {operation} ({outcome})"));
        }

        let changed = edited.value.iter().any(|outcome| outcome.is_change());
        let summary = format!("Applied {} operation(s) from {}", plan.operations.len(), self.plan.display());
        reporter.finish(&edited, &summary, changed)
    }
}
