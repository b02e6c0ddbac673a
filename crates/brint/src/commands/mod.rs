//! CLI command implementations

pub mod check;
pub mod list;
pub mod version;

use anyhow::{Context, Result};
use brint_core::config::{find_config_from_dir, LocatedConfig};
use std::path::Path;

/// Closest Brint.toml at or above `dir`, or an error naming the search start
pub(crate) fn require_config(dir: &Path) -> Result<LocatedConfig> {
    let located = find_config_from_dir(dir)?;
    located.with_context(|| {
        format!(
            "{} not found in {} or any parent directory",
            brint_core::config::CONFIG_FILE_NAME,
            dir.display()
        )
    })
}

pub(crate) fn current_dir() -> Result<std::path::PathBuf> {
    std::env::current_dir().context("Failed to get current directory")
}
