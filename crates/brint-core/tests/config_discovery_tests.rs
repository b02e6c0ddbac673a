//! Brint.toml discovery as a version source

use brint_core::config::{find_config, ConfigCache, ConfigVersion, CONFIG_FILE_NAME};
use brint_core::{feature, BrintError};
use brint_testkit::{temp_dir_in_workspace, write_brint_toml, write_source};
use std::sync::Arc;

type Function = fn() -> &'static str;

fn old_fn() -> &'static str {
    "old"
}

fn new_fn() -> &'static str {
    "new"
}

#[test]
fn test_config_in_ancestor_directory_is_found() {
    let temp = temp_dir_in_workspace();
    write_brint_toml(temp.path(), "3.1.0");
    let source = write_source(temp.path(), "src/gates/svg.rs", "fn f() {}");

    let located = find_config(&source).unwrap().unwrap();
    assert_eq!(located.path, temp.path().join(CONFIG_FILE_NAME));
    assert_eq!(located.config.version, "3.1.0");
}

#[test]
fn test_closest_config_wins() {
    let temp = temp_dir_in_workspace();
    write_brint_toml(temp.path(), "1.0.0");
    let nested = write_source(temp.path(), "src/plugin/lib.rs", "fn f() {}");
    write_brint_toml(&temp.path().join("src").join("plugin"), "2.0.0");
    let outer = write_source(temp.path(), "src/main.rs", "fn main() {}");

    let cache = Arc::new(ConfigCache::new());
    let nested_version = ConfigVersion::with_cache(&nested, Arc::clone(&cache));
    let outer_version = ConfigVersion::with_cache(&outer, Arc::clone(&cache));

    assert_eq!(nested_version.resolve().unwrap().to_string(), "2.0.0");
    assert_eq!(outer_version.resolve().unwrap().to_string(), "1.0.0");
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_config_version_drives_feature_resolution() {
    let temp = temp_dir_in_workspace();
    write_brint_toml(temp.path(), "3.0.0");
    let source = write_source(temp.path(), "src/greeting.rs", "fn f() {}");

    let current = ConfigVersion::with_cache(&source, Arc::new(ConfigCache::new()));
    let function = feature::<Function>("asdf", "3.0.0")
        .unwrap()
        .new(new_fn)
        .resolve(&current)
        .unwrap()
        .apply(old_fn);

    assert_eq!(function(), "new");
}

#[test]
fn test_cached_lookup_survives_config_removal() {
    let temp = temp_dir_in_workspace();
    let config = write_brint_toml(temp.path(), "4.0.0");
    let source = write_source(temp.path(), "src/lib.rs", "fn f() {}");

    let current = ConfigVersion::with_cache(&source, Arc::new(ConfigCache::new()));
    assert_eq!(current.resolve().unwrap().major, 4);

    std::fs::remove_file(config).unwrap();
    assert_eq!(current.resolve().unwrap().major, 4);
}

#[test]
fn test_missing_config_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let source = write_source(temp.path(), "src/lib.rs", "fn f() {}");

    let cache = Arc::new(ConfigCache::new());
    let err = ConfigVersion::with_cache(&source, Arc::clone(&cache))
        .resolve()
        .unwrap_err();

    assert!(matches!(err, BrintError::ConfigNotFound { .. }));
    assert!(cache.is_empty());
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = temp_dir_in_workspace();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), "version = [").unwrap();
    let source = write_source(temp.path(), "src/lib.rs", "fn f() {}");

    let err = ConfigVersion::with_cache(&source, Arc::new(ConfigCache::new()))
        .resolve()
        .unwrap_err();
    assert!(matches!(err, BrintError::ConfigInvalid { .. }));
}

#[test]
fn test_unparseable_config_version_is_a_parse_error() {
    let temp = temp_dir_in_workspace();
    write_brint_toml(temp.path(), "three");
    let source = write_source(temp.path(), "src/lib.rs", "fn f() {}");

    let err = ConfigVersion::with_cache(&source, Arc::new(ConfigCache::new()))
        .resolve()
        .unwrap_err();
    assert!(matches!(err, BrintError::ParseError { ref input, .. } if input == "three"));
}
