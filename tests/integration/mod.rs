//! Integration test suite for mcp-patch
//!
//! End-to-end tests that run the compiled binary against configuration files in
//! a temporary home directory.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **apply**: patch plan files
//! - **edit**: `set`, `remove` and `show`, plus load/save failure handling
//! - **mcp**: MCP server add, remove, migrate and list

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod apply;
mod edit;
mod mcp;
