//! The `feature` entry point
//!
//! ```rust
//! use brint_core::feature;
//!
//! type Greet = fn() -> &'static str;
//!
//! fn greet() -> &'static str { "hello" }
//! fn greet_v3() -> &'static str { "hello, v3" }
//!
//! # fn main() -> brint_core::Result<()> {
//! let greet = feature::<Greet>("greeting", "3.0.0")?
//!     .new(greet_v3)
//!     .resolve("3.1.0")?
//!     .apply(greet);
//!
//! assert_eq!(greet(), "hello, v3");
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::gate::{evaluate, GateDeclaration, Substitution};
use crate::resolve::CurrentVersionSource;
use crate::version::parse_version;

/// Declare a version gate
///
/// Fails with [`ParseError`](crate::BrintError::ParseError) right away if
/// `version` is not a valid semantic version.
pub fn feature<T>(name: impl Into<String>, version: &str) -> Result<GateDeclaration<T>> {
    let version = parse_version(version)?;
    Ok(GateDeclaration::declare(name, version))
}

impl<T> GateDeclaration<T> {
    /// Resolve the current version once and select the substitution
    ///
    /// Resolution errors are returned as-is; a gate whose current version
    /// cannot be determined never falls back to either side.
    pub fn resolve<S>(self, source: &S) -> Result<Substitution<T>>
    where
        S: CurrentVersionSource + ?Sized,
    {
        let current = source.current_version()?;
        Ok(evaluate(self, &current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrintError;

    #[test]
    fn test_feature_rejects_invalid_version() {
        let result = feature::<fn()>("x", "not-a-version");
        assert!(matches!(result, Err(BrintError::ParseError { .. })));
    }

    #[test]
    fn test_feature_accepts_prerelease_version() {
        let gate = feature::<()>("x", "1.2.3-rc1").unwrap();
        assert_eq!(gate.version.pre.as_str(), "rc1");
        assert_eq!(gate.name, "x");
    }

    #[test]
    fn test_resolve_with_explicit_version() {
        let sub = feature("x", "2.0.0").unwrap().old(1).resolve("1.0.0").unwrap();
        assert_eq!(sub.apply(0), 1);
    }

    #[test]
    fn test_resolution_error_propagates() {
        let err = feature("x", "2.0.0")
            .unwrap()
            .old(1)
            .resolve("garbage")
            .unwrap_err();
        assert!(matches!(err, BrintError::ParseError { ref input, .. } if input == "garbage"));
    }
}
