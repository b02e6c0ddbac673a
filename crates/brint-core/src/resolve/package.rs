use crate::error::{BrintError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

/// Attribute names holding a package's version, in lookup priority order
pub const VERSION_ATTRIBUTES: [&str; 2] = ["__version__", "__VERSION__"];

/// An importable unit exposing string attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    attributes: BTreeMap<String, String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: normalize_package_name(&name.into()),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First attribute from [`VERSION_ATTRIBUTES`] that is present
    ///
    /// Returns the attribute name together with its value.
    pub fn version_attribute(&self) -> Option<(&'static str, &str)> {
        VERSION_ATTRIBUTES
            .iter()
            .find_map(|key| self.attribute(key).map(|value| (*key, value)))
    }
}

/// Build a [`Package`] for the calling crate from its Cargo metadata
///
/// Named after the crate as `module_path!()` sees it, so it pairs with
/// `call_site!()` in integration tests, examples and renamed libs. The
/// package version is exposed as `__version__`.
#[macro_export]
macro_rules! crate_package {
    () => {
        $crate::resolve::Package::new(env!("CARGO_CRATE_NAME"))
            .with_attribute("__version__", env!("CARGO_PKG_VERSION"))
    };
}

/// Cargo package names allow `-`, module paths only `_`
pub fn normalize_package_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Locates packages by name
///
/// Importing may initialize the package as a side effect.
pub trait PackageLoader {
    fn import(&self, name: &str) -> Result<&Package>;
}

type PackageInit = Box<dyn Fn() -> Package + Send + Sync>;

enum Entry {
    Ready(Package),
    Lazy {
        init: PackageInit,
        cell: OnceLock<Package>,
    },
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Ready(package) => f.debug_tuple("Ready").field(package).finish(),
            Entry::Lazy { cell, .. } => f
                .debug_struct("Lazy")
                .field("initialized", &cell.get().is_some())
                .finish(),
        }
    }
}

/// In-process table of known packages
#[derive(Debug, Default)]
pub struct PackageTable {
    entries: HashMap<String, Entry>,
}

impl PackageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-initialized package, replacing any previous entry
    pub fn register(&mut self, package: Package) -> &mut Self {
        self.entries
            .insert(package.name().to_string(), Entry::Ready(package));
        self
    }

    /// Register a package whose initializer runs on first import
    ///
    /// The initializer runs at most once per table.
    pub fn register_lazy<F>(&mut self, name: &str, init: F) -> &mut Self
    where
        F: Fn() -> Package + Send + Sync + 'static,
    {
        self.entries.insert(
            normalize_package_name(name),
            Entry::Lazy {
                init: Box::new(init),
                cell: OnceLock::new(),
            },
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_package_name(name))
    }
}

impl PackageLoader for PackageTable {
    fn import(&self, name: &str) -> Result<&Package> {
        let key = normalize_package_name(name);
        match self.entries.get(&key) {
            Some(Entry::Ready(package)) => Ok(package),
            Some(Entry::Lazy { init, cell }) => Ok(cell.get_or_init(|| {
                log::debug!("initializing package '{}'", key);
                init()
            })),
            None => Err(BrintError::ImportError { package: key }),
        }
    }
}
