//! List command - scan sources for gate declarations

use crate::output::{print_json, print_text};
use anyhow::Result;
use brint_core::config::{find_config, find_config_from_dir, LocatedConfig};
use brint_core::scan::{scan_dir, FeatureDecl, ScanReport};
use brint_core::version::{gate_passes, SemanticVersion};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct VersionGroup<'a> {
    version: &'a SemanticVersion,
    /// `None` when no Brint.toml was found
    active: Option<bool>,
    features: Vec<&'a FeatureDecl>,
}

#[derive(Debug, Serialize)]
struct DiagnosticEntry {
    path: PathBuf,
    line: usize,
    error: String,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    files: usize,
    bytes: usize,
    current_version: Option<String>,
    groups: Vec<VersionGroup<'a>>,
    diagnostics: Vec<DiagnosticEntry>,
}

/// Execute `brint list [PATH]`
pub fn execute_list(path: &Path, json: bool) -> Result<()> {
    let report = scan_dir(path)?;
    let current = current_version(path)?;

    let groups: Vec<VersionGroup<'_>> = report
        .by_version()
        .into_iter()
        .map(|(version, features)| VersionGroup {
            version,
            active: current.as_ref().map(|current| gate_passes(version, current)),
            features,
        })
        .collect();

    if json {
        let output = ListOutput {
            files: report.files,
            bytes: report.bytes,
            current_version: current.as_ref().map(|v| v.to_string()),
            groups,
            diagnostics: report
                .diagnostics
                .iter()
                .map(|d| DiagnosticEntry {
                    path: d.path.clone(),
                    line: d.line,
                    error: d.error.to_string(),
                })
                .collect(),
        };
        return print_json(&output);
    }

    render_human(path, &report, current.as_ref(), &groups)
}

/// Current version from the Brint.toml closest to `path`, if any
fn current_version(path: &Path) -> Result<Option<SemanticVersion>> {
    let located: Option<LocatedConfig> = if path.is_dir() {
        find_config_from_dir(&std::path::absolute(path)?)?
    } else {
        find_config(&std::path::absolute(path)?)?
    };

    match located {
        Some(located) => Ok(Some(located.config.current_version()?)),
        None => {
            log::debug!("no Brint.toml above {}", path.display());
            Ok(None)
        }
    }
}

fn render_human(
    root: &Path,
    report: &ScanReport,
    current: Option<&SemanticVersion>,
    groups: &[VersionGroup<'_>],
) -> Result<()> {
    print_text(&format!(
        "Scanned {} files ({} bytes), found {} features",
        report.files,
        report.bytes,
        report.features.len()
    ))?;
    if let Some(current) = current {
        print_text(&format!("Current version: {}", current))?;
    }

    for group in groups {
        print_text("")?;
        let header = group.version.to_string().bold().underline();
        match group.active {
            Some(true) => print_text(&format!("{} {}", header, "(active)".green()))?,
            Some(false) => print_text(&format!("{} {}", header, "(pending)".yellow()))?,
            None => print_text(&header.to_string())?,
        }

        for feature in &group.features {
            render_feature(root, feature)?;
        }
    }

    if !report.diagnostics.is_empty() {
        print_text("")?;
        for diagnostic in &report.diagnostics {
            print_text(&format!(
                "{} {}:{}: {}",
                "✗".red().bold(),
                relative(root, &diagnostic.path).display(),
                diagnostic.line,
                diagnostic.error
            ))?;
        }
    }

    Ok(())
}

fn render_feature(root: &Path, feature: &FeatureDecl) -> Result<()> {
    print_text(&format!(
        "  {}  {}:{}",
        feature.feature_name.cyan(),
        relative(root, &feature.path).display(),
        feature.line
    ))?;
    if let Some(old) = &feature.old {
        print_text(&format!("    old: {}", old))?;
    }
    print_text(&format!("    new: {}", feature.new))?;
    if let Some(author) = &feature.author {
        print_text(&format!("    author: {}", author))?;
    }
    if let Some(description) = &feature.description {
        print_text(&format!("    description: {}", description))?;
    }
    Ok(())
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
