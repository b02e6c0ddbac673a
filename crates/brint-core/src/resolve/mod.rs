//! Current version resolution
//!
//! A gate compares its version against the "current version" of the
//! application that declares it. This module finds that version.
//!
//! ## Resolution Flow
//!
//! ```text
//! CallSite { module: "app::render::svg", package: "app::render" }
//!     ↓
//! 1. Root package of the declared package ("app")
//!     ↓
//! 2. PackageLoader::import("app")        → ImportError if unknown
//!     ↓
//! 3. __version__, then __VERSION__        → ResolutionError if neither
//!     ↓
//! 4. parse_version(value)                 → ParseError if invalid
//! ```
//!
//! The call site is passed explicitly. [`call_site!`] captures it from
//! `module_path!()` at the point of declaration.
//!
//! # Examples
//!
//! ```rust
//! use brint_core::resolve::{resolve_current_version, CallSite, Package, PackageTable};
//!
//! let mut packages = PackageTable::new();
//! packages.register(Package::new("app").with_attribute("__version__", "3.0.0"));
//!
//! let site = CallSite::new("app::render");
//! let current = resolve_current_version(&packages, &site).unwrap();
//! assert_eq!(current.to_string(), "3.0.0");
//! ```

mod package;

pub use package::{
    normalize_package_name, Package, PackageLoader, PackageTable, VERSION_ATTRIBUTES,
};

use crate::config::ConfigVersion;
use crate::error::{BrintError, Result};
use crate::version::{parse_version, SemanticVersion};

const PATH_SEPARATOR: &str = "::";

/// Where a gate is declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    module: String,
    package: String,
}

impl CallSite {
    /// Call site for a module path such as `app::render::svg`
    ///
    /// The declared package is the module's parent. A single-segment
    /// module (a crate root) is its own package.
    pub fn new(module: impl Into<String>) -> Self {
        let module = module.into();
        let package = match module.rsplit_once(PATH_SEPARATOR) {
            Some((parent, _)) => parent.to_string(),
            None => module.clone(),
        };
        Self { module, package }
    }

    /// Call site with an explicitly declared package
    pub fn with_package(module: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            package: package.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// First segment of the declared package
    pub fn root_package(&self) -> Result<&str> {
        let root = self
            .package
            .split(PATH_SEPARATOR)
            .next()
            .map(str::trim)
            .unwrap_or_default();

        if root.is_empty() {
            return Err(BrintError::InvalidCallSite(format!(
                "module '{}' declares no package",
                self.module
            )));
        }
        Ok(root)
    }
}

/// Capture the [`CallSite`] of the code invoking the macro
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::resolve::CallSite::new(module_path!())
    };
}

/// Anything able to supply the current application version
pub trait CurrentVersionSource {
    fn current_version(&self) -> Result<SemanticVersion>;
}

/// Current version read from the root package of a call site
#[derive(Debug)]
pub struct PackageVersion<'a, L: ?Sized> {
    loader: &'a L,
    call_site: CallSite,
}

impl<'a, L: PackageLoader + ?Sized> PackageVersion<'a, L> {
    pub fn new(loader: &'a L, call_site: CallSite) -> Self {
        Self { loader, call_site }
    }

    pub fn call_site(&self) -> &CallSite {
        &self.call_site
    }
}

impl<L: PackageLoader + ?Sized> CurrentVersionSource for PackageVersion<'_, L> {
    fn current_version(&self) -> Result<SemanticVersion> {
        resolve_current_version(self.loader, &self.call_site)
    }
}

impl CurrentVersionSource for SemanticVersion {
    fn current_version(&self) -> Result<SemanticVersion> {
        Ok(self.clone())
    }
}

impl CurrentVersionSource for str {
    fn current_version(&self) -> Result<SemanticVersion> {
        parse_version(self)
    }
}

impl CurrentVersionSource for ConfigVersion {
    fn current_version(&self) -> Result<SemanticVersion> {
        self.resolve()
    }
}

impl<S: CurrentVersionSource + ?Sized> CurrentVersionSource for &S {
    fn current_version(&self) -> Result<SemanticVersion> {
        (**self).current_version()
    }
}

/// Resolve the current version declared by the root package of `call_site`
///
/// Re-resolves on every call; nothing is cached.
pub fn resolve_current_version<L>(loader: &L, call_site: &CallSite) -> Result<SemanticVersion>
where
    L: PackageLoader + ?Sized,
{
    let root = call_site.root_package()?;
    let package = loader.import(root)?;

    let (attribute, raw) =
        package
            .version_attribute()
            .ok_or_else(|| BrintError::ResolutionError {
                package: package.name().to_string(),
            })?;

    log::debug!(
        "resolved {}.{} = '{}' for {}",
        package.name(),
        attribute,
        raw,
        call_site.module()
    );

    parse_version(raw)
}
