//! Version command - show the current version from Brint.toml

use crate::output::{print_json, print_text};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    name: Option<String>,
    config_path: String,
}

/// Execute `brint version`
pub fn execute_version(json: bool) -> Result<()> {
    let located = super::require_config(&super::current_dir()?)?;
    let version = located.config.current_version()?;

    let info = VersionInfo {
        version: version.to_string(),
        name: located.config.name.clone(),
        config_path: located.path.display().to_string(),
    };

    if json {
        return print_json(&info);
    }

    match &info.name {
        Some(name) => print_text(&format!("{} {}", name, info.version))?,
        None => print_text(&info.version)?,
    }
    print_text(&format!("Config: {}", info.config_path))?;
    Ok(())
}
