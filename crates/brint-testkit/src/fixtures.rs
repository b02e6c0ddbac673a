//! Fixture management for testing
//!
//! Helpers for laying out a small application on disk: a `Brint.toml`
//! declaring the current version and Rust sources containing gate
//! declarations.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `Brint.toml` with the given version into `dir`
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_brint_toml(dir: &Path, version: &str) -> PathBuf {
    let path = dir.join("Brint.toml");
    std::fs::write(&path, format!("version = \"{}\"\n", version))
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path
}

/// Write a source file at `relative` under `root`, creating parent dirs
///
/// # Panics
///
/// Panics if the directories or the file cannot be created.
pub fn write_source(root: &Path, relative: &str, code: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create source directory");
    }
    std::fs::write(&path, code)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path
}

const GREETING_SOURCE: &str = r#"
use brint_core::feature;

fn new_function() {
    println!("new function");
}

pub fn example1(current: &str) -> brint_core::Result<()> {
    let function = feature::<fn()>("asdf", "3.0.0")?
        .new(new_function)
        .resolve(current)?
        .apply(function);
    function();
    Ok(())
}

fn function() {
    println!("old function");
}
"#;

const CLASS_SOURCE: &str = r#"
use brint_core::feature;

pub fn example2(current: &str) -> brint_core::Result<()> {
    let class = feature("new class", "4.0.0")?
        .old(OldClass::boxed as fn() -> Box<dyn Class>)
        .author("someone")
        .resolve(current)?
        .apply(NewClass::boxed);
    let _ = class();
    Ok(())
}
"#;

/// Create a project with a `Brint.toml` and two gated source files
///
/// Layout:
///
/// ```text
/// Brint.toml            version = <version>
/// src/greeting.rs       feature("asdf", "3.0.0") with .new(new_function)
/// src/class.rs          feature("new class", "4.0.0") with .old(OldClass::boxed)
/// target/skipped.rs     feature("ignored", "9.0.0"), never scanned
/// ```
pub fn sample_project(version: &str) -> TempDir {
    let temp = crate::temp_dir_in_workspace();
    let root = temp.path();

    write_brint_toml(root, version);
    write_source(root, "src/greeting.rs", GREETING_SOURCE);
    write_source(root, "src/class.rs", CLASS_SOURCE);
    write_source(
        root,
        "target/skipped.rs",
        "fn f() { feature(\"ignored\", \"9.0.0\"); }\n",
    );

    temp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_project_layout() {
        let temp = sample_project("3.5.0");
        let root = temp.path();

        let config = std::fs::read_to_string(root.join("Brint.toml")).unwrap();
        assert!(config.contains("3.5.0"));
        assert!(root.join("src/greeting.rs").is_file());
        assert!(root.join("src/class.rs").is_file());
        assert!(root.join("target/skipped.rs").is_file());
    }

    #[test]
    fn test_write_source_creates_parents() {
        let temp = crate::temp_dir_in_workspace();
        let path = write_source(temp.path(), "a/b/c.rs", "fn main() {}");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "fn main() {}");
    }
}
