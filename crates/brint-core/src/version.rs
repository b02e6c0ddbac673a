//! Semantic version parsing and the gate comparison rule
//!
//! Versions are plain [`semver::Version`] values. The only deviation from
//! standard semver precedence is [`gate_passes`], which compares versions
//! with their prerelease and build metadata cleared, so `1.0.0-rc1` and
//! `1.0.0` gate identically.

use crate::error::{BrintError, Result};
use semver::{BuildMetadata, Prerelease};

/// A parsed semantic version (`major.minor.patch[-pre][+build]`)
pub type SemanticVersion = semver::Version;

/// Parse a version string, failing with [`BrintError::ParseError`]
///
/// # Examples
///
/// ```rust
/// use brint_core::version::parse_version;
///
/// let v = parse_version("1.2.3-rc1").unwrap();
/// assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
/// assert!(parse_version("not-a-version").is_err());
/// ```
pub fn parse_version(input: &str) -> Result<SemanticVersion> {
    SemanticVersion::parse(input).map_err(|e| BrintError::parse(input, e))
}

/// Drop prerelease and build metadata, keeping `major.minor.patch`
pub fn normalize(version: &SemanticVersion) -> SemanticVersion {
    let mut normalized = version.clone();
    normalized.pre = Prerelease::EMPTY;
    normalized.build = BuildMetadata::EMPTY;
    normalized
}

/// Whether the `current` version has reached the `gate` version
///
/// Both sides are normalized first. semver orders build metadata as a
/// tiebreaker, so it is cleared along with the prerelease.
pub fn gate_passes(gate: &SemanticVersion, current: &SemanticVersion) -> bool {
    normalize(current) >= normalize(gate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        parse_version(s).unwrap()
    }

    #[test]
    fn test_gate_passes_on_equal_versions() {
        assert!(gate_passes(&v("3.0.0"), &v("3.0.0")));
    }

    #[test]
    fn test_gate_passes_when_current_is_newer() {
        assert!(gate_passes(&v("3.0.0"), &v("3.0.1")));
        assert!(gate_passes(&v("3.0.0"), &v("3.1.0")));
        assert!(gate_passes(&v("3.9.9"), &v("4.0.0")));
    }

    #[test]
    fn test_gate_fails_when_current_is_older() {
        assert!(!gate_passes(&v("3.0.0"), &v("2.9.9")));
        assert!(!gate_passes(&v("3.1.0"), &v("3.0.5")));
        assert!(!gate_passes(&v("0.0.2"), &v("0.0.1")));
    }

    #[test]
    fn test_components_compare_numerically() {
        // 10 > 9 numerically even though "10" < "9" as strings
        assert!(gate_passes(&v("1.9.0"), &v("1.10.0")));
        assert!(!gate_passes(&v("1.10.0"), &v("1.9.0")));
    }

    #[test]
    fn test_prerelease_is_ignored_in_both_directions() {
        assert!(gate_passes(&v("1.0.0-rc1"), &v("1.0.0")));
        assert!(gate_passes(&v("1.0.0"), &v("1.0.0-rc1")));
        assert!(gate_passes(&v("1.0.0-beta"), &v("1.0.0-alpha")));
    }

    #[test]
    fn test_prerelease_does_not_lift_an_older_version() {
        assert!(!gate_passes(&v("2.0.0"), &v("1.9.9-rc1")));
    }

    #[test]
    fn test_build_metadata_is_ignored() {
        assert!(gate_passes(&v("1.0.0+build.9"), &v("1.0.0+build.1")));
        assert!(gate_passes(&v("1.0.0"), &v("1.0.0+abc")));
    }

    #[test]
    fn test_standard_ordering_still_applies_outside_gates() {
        // Plain semver precedence keeps prereleases below the release
        assert!(v("1.0.0-rc1") < v("1.0.0"));
        assert_eq!(normalize(&v("1.0.0-rc1+b5")), v("1.0.0"));
    }

    #[test]
    fn test_parse_error_reports_input() {
        let err = parse_version("not-a-version").unwrap_err();
        match &err {
            BrintError::ParseError { input, .. } => assert_eq!(input, "not-a-version"),
            other => panic!("expected ParseError, got {:?}", other),
        }
        assert!(err.to_string().starts_with("VERSION_PARSE_ERROR"));
    }

    #[test]
    fn test_parse_rejects_partial_versions() {
        assert!(parse_version("1.0").is_err());
        assert!(parse_version("").is_err());
        assert!(parse_version("v1.0.0").is_err());
    }
}
