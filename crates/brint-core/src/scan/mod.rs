//! Static discovery of gate declarations in Rust sources
//!
//! ## Pipeline
//!
//! ```text
//! walkdir (*.rs, skipping hidden dirs and target/)
//!     ↓
//! rayon par_iter: read_to_string → syn::parse_file → DeclarationVisitor
//!     ↓
//! ScanReport { files, bytes, features, diagnostics }
//! ```
//!
//! A declaration is a call to a function named `feature` with a literal name
//! and version, plus whatever is chained on it:
//!
//! ```text
//! feature("svg-renderer", "3.0.0")?.new(render_v3).resolve(&current)?.apply(render)
//! ```

mod args;
mod visitor;

pub use args::DeclarationError;

use crate::error::Result;
use crate::version::SemanticVersion;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use visitor::DeclarationVisitor;
use walkdir::{DirEntry, WalkDir};

/// A gate declaration found in source
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FeatureDecl {
    pub path: PathBuf,
    pub line: usize,
    pub feature_name: String,
    pub version: SemanticVersion,
    /// Implementation active once the version has arrived
    pub new: String,
    /// Implementation active before the version arrives, if known
    pub old: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// A rejected declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub line: usize,
    pub error: DeclarationError,
}

/// Declarations found in one source file
#[derive(Debug, Default)]
pub struct SourceScan {
    pub features: Vec<FeatureDecl>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan a single source text
///
/// Fails only when `code` is not valid Rust.
pub fn scan_source(path: &Path, code: &str) -> std::result::Result<SourceScan, syn::Error> {
    let file = syn::parse_file(code)?;

    let mut visitor = DeclarationVisitor::new(path);
    syn::visit::Visit::visit_file(&mut visitor, &file);

    Ok(SourceScan {
        features: visitor.features,
        diagnostics: visitor.diagnostics,
    })
}

/// Aggregated result of a directory scan
#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: usize,
    pub bytes: usize,
    pub features: Vec<FeatureDecl>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanReport {
    /// Declarations grouped by version, newest first
    pub fn by_version(&self) -> Vec<(&SemanticVersion, Vec<&FeatureDecl>)> {
        let mut groups: BTreeMap<&SemanticVersion, Vec<&FeatureDecl>> = BTreeMap::new();
        for feature in &self.features {
            groups.entry(&feature.version).or_default().push(feature);
        }
        groups.into_iter().rev().collect()
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "target"
}

/// Collect `.rs` files under `root`, sorted by path
pub fn collect_sources(root: &Path) -> Vec<PathBuf> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
    {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_file()
                    && path.extension().is_some_and(|ext| ext == "rs")
                {
                    sources.push(path.to_path_buf());
                }
            }
            Err(e) => {
                log::warn!("Error while walking {}: {}", root.display(), e);
            }
        }
    }

    sources.sort();
    sources
}

/// Scan every Rust source under `root`
///
/// Files that cannot be read or parsed are logged and skipped. A single
/// file may be passed as `root`.
pub fn scan_dir(root: &Path) -> Result<ScanReport> {
    // Surface a missing root as an error instead of an empty report
    std::fs::metadata(root)?;

    let sources = collect_sources(root);
    log::debug!("scanning {} files under {}", sources.len(), root.display());

    let scanned: Vec<(usize, SourceScan)> = sources
        .par_iter()
        .filter_map(|path| {
            let code = match std::fs::read_to_string(path) {
                Ok(code) => code,
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                    return None;
                }
            };
            match scan_source(path, &code) {
                Ok(scan) => Some((code.len(), scan)),
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect();

    let mut report = ScanReport::default();
    for (bytes, scan) in scanned {
        report.files += 1;
        report.bytes += bytes;
        report.features.extend(scan.features);
        report.diagnostics.extend(scan.diagnostics);
    }

    Ok(report)
}
