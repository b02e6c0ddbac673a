//! Brint.toml discovery
//!
//! An alternative to package attributes: the current version is read from the
//! closest `Brint.toml` above a source file.
//!
//! ```text
//! /work/app/Brint.toml        ← found
//! /work/app/src/gates/svg.rs  ← source file
//!
//! search: /work/app/src/gates → /work/app/src → /work/app ✓
//! ```
//!
//! Lookups are cached per absolute source path for the lifetime of the
//! process. The cache is never invalidated, so it assumes config files do
//! not change while the process runs. Use [`ConfigCache::new`] for a cache
//! with a shorter lifetime.

pub mod consts;
pub mod model;

pub use consts::CONFIG_FILE_NAME;
pub use model::BrintConfig;

use crate::error::{BrintError, Result};
use crate::version::SemanticVersion;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

/// A parsed Brint.toml and where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedConfig {
    pub path: PathBuf,
    pub config: BrintConfig,
}

/// Find the closest Brint.toml, starting at `dir` and walking up
pub fn find_config_from_dir(dir: &Path) -> Result<Option<LocatedConfig>> {
    for candidate_dir in dir.ancestors() {
        let candidate = candidate_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("found {}", candidate.display());
            let config = BrintConfig::from_file(&candidate)?;
            return Ok(Some(LocatedConfig {
                path: candidate,
                config,
            }));
        }
    }

    Ok(None)
}

/// Find the closest Brint.toml for a source file
///
/// The search starts in the directory containing `source_file`.
pub fn find_config(source_file: &Path) -> Result<Option<LocatedConfig>> {
    match source_file.parent() {
        Some(dir) => find_config_from_dir(dir),
        None => Ok(None),
    }
}

/// Cache of discovered configs keyed by absolute source path
///
/// Only successful lookups are stored. Concurrent lookups of the same path may
/// both hit the filesystem; the last insert wins and both computed the same
/// value.
#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: Mutex<HashMap<PathBuf, Arc<LocatedConfig>>>,
}

static GLOBAL_CACHE: LazyLock<ConfigCache> = LazyLock::new(ConfigCache::new);

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache, never invalidated
    pub fn global() -> &'static ConfigCache {
        &GLOBAL_CACHE
    }

    pub fn get_or_load(&self, source_file: &Path) -> Result<Option<Arc<LocatedConfig>>> {
        let key = std::path::absolute(source_file)?;

        if let Some(hit) = self.lock().get(&key) {
            return Ok(Some(Arc::clone(hit)));
        }

        // Lock released while reading the filesystem
        let Some(found) = find_config(&key)? else {
            return Ok(None);
        };

        let found = Arc::new(found);
        self.lock().insert(key, Arc::clone(&found));
        Ok(Some(found))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<LocatedConfig>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Current version read from the Brint.toml closest to a source file
#[derive(Debug, Clone)]
pub struct ConfigVersion {
    source_file: PathBuf,
    cache: Option<Arc<ConfigCache>>,
}

impl ConfigVersion {
    /// Resolve through the process-wide cache
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            cache: None,
        }
    }

    /// Resolve through a caller-owned cache
    pub fn with_cache(source_file: impl Into<PathBuf>, cache: Arc<ConfigCache>) -> Self {
        Self {
            source_file: source_file.into(),
            cache: Some(cache),
        }
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn resolve(&self) -> Result<SemanticVersion> {
        let cache = match &self.cache {
            Some(cache) => cache.as_ref(),
            None => ConfigCache::global(),
        };

        let located = cache
            .get_or_load(&self.source_file)?
            .ok_or_else(|| BrintError::ConfigNotFound {
                path: self.source_file.clone(),
            })?;

        located.config.current_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, version: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, format!("version = \"{}\"\n", version)).unwrap();
        path
    }

    #[test]
    fn test_find_config_in_same_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let expected = write_config(temp.path(), "1.0.0");

        let found = find_config(&temp.path().join("lib.rs")).unwrap().unwrap();
        assert_eq!(found.path, expected);
        assert_eq!(found.config.version, "1.0.0");
    }

    #[test]
    fn test_closest_config_wins() {
        let temp = tempfile::TempDir::new().unwrap();
        write_config(temp.path(), "1.0.0");
        let nested = temp.path().join("crates").join("inner");
        fs::create_dir_all(&nested).unwrap();
        write_config(&nested, "2.0.0");

        let found = find_config(&nested.join("src.rs")).unwrap().unwrap();
        assert_eq!(found.config.version, "2.0.0");
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let temp = tempfile::TempDir::new().unwrap();
        write_config(temp.path(), "1.0.0");
        let nested = temp.path().join("sub");
        fs::create_dir_all(nested.join(CONFIG_FILE_NAME)).unwrap();

        let found = find_config_from_dir(&nested).unwrap().unwrap();
        assert_eq!(found.config.version, "1.0.0");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "name = \"app\"\n").unwrap();

        let err = find_config_from_dir(temp.path()).unwrap_err();
        assert!(matches!(err, BrintError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_cache_keeps_first_lookup() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = write_config(temp.path(), "1.0.0");
        let source = temp.path().join("main.rs");

        let cache = ConfigCache::new();
        let first = cache.get_or_load(&source).unwrap().unwrap();
        assert_eq!(first.config.version, "1.0.0");

        // Cached entries survive edits on disk
        write_config(temp.path(), "9.0.0");
        let second = cache.get_or_load(&source).unwrap().unwrap();
        assert_eq!(second.config.version, "1.0.0");
        assert_eq!(second.path, config_path);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_does_not_store_misses() {
        let temp = tempfile::TempDir::new().unwrap();
        let cache = ConfigCache::new();
        let source = temp.path().join("main.rs");

        // A Brint.toml above the temp dir would make this lookup a hit
        if find_config(&source).unwrap().is_none() {
            assert!(cache.get_or_load(&source).unwrap().is_none());
            assert!(cache.is_empty());
        }

        write_config(temp.path(), "2.0.0");
        let found = cache.get_or_load(&source).unwrap().unwrap();
        assert_eq!(found.config.version, "2.0.0");
    }

    #[test]
    fn test_config_version_source() {
        let temp = tempfile::TempDir::new().unwrap();
        write_config(temp.path(), "3.1.0-rc1");
        let cache = Arc::new(ConfigCache::new());

        let source = ConfigVersion::with_cache(temp.path().join("lib.rs"), cache);
        assert_eq!(source.resolve().unwrap().to_string(), "3.1.0-rc1");
    }

    #[test]
    fn test_config_version_invalid_version() {
        let temp = tempfile::TempDir::new().unwrap();
        write_config(temp.path(), "three");

        let source = ConfigVersion::with_cache(
            temp.path().join("lib.rs"),
            Arc::new(ConfigCache::new()),
        );
        assert!(matches!(
            source.resolve(),
            Err(BrintError::ParseError { .. })
        ));
    }
}
