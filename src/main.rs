//! mcp-patch CLI entry point
//!
//! Parses arguments, runs the selected command and renders any failure with
//! context and suggestions. Every failure exits with status 1.

use clap::Parser;
use mcp_patch::cli;
use mcp_patch::core::user_friendly_error;

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
