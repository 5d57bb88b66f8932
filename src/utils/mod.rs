//! Cross-platform utilities: atomic file writes, structured file formats and
//! home-directory based path resolution.

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, create_backup, ensure_dir, safe_write};
pub use platform::{
    claude_config_path, claude_desktop_config_path, get_home_dir, is_windows, resolve_path,
};
