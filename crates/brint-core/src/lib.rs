//! Version-gated symbol substitution.
//!
//! A gate pairs a threshold version with optional `old` and `new`
//! replacements. Once the application's current version reaches the
//! threshold, the `new` replacement (if any) takes over the declared symbol;
//! before that, the `old` replacement (if any) does.
//!
//! # Architecture
//!
//! - [`version`]: semver parsing and the prerelease-insensitive comparison
//! - [`resolve`]: finding the current version from a call site's root package
//! - [`gate`]: declarations and the four-way outcome table
//! - [`feature`](mod@feature): the entry point tying the two together
//! - [`config`]: `Brint.toml` discovery as an alternate version source
//! - [`scan`]: static discovery of declarations in Rust sources
//!
//! # Examples
//!
//! ```rust
//! use brint_core::resolve::{CallSite, Package, PackageTable, PackageVersion};
//! use brint_core::feature;
//!
//! struct OldRenderer;
//! struct NewRenderer;
//!
//! trait Render {
//!     fn render(&self) -> &'static str;
//! }
//! impl Render for OldRenderer {
//!     fn render(&self) -> &'static str { "old" }
//! }
//! impl Render for NewRenderer {
//!     fn render(&self) -> &'static str { "new" }
//! }
//!
//! # fn main() -> brint_core::Result<()> {
//! let mut packages = PackageTable::new();
//! packages.register(Package::new("app").with_attribute("__version__", "2.0.0"));
//!
//! // Inside the `app` crate this would be `call_site!()`
//! let current = PackageVersion::new(&packages, CallSite::new("app::render"));
//!
//! let renderer: Box<dyn Render> = feature("renderer", "3.0.0")?
//!     .old(Box::new(OldRenderer) as Box<dyn Render>)
//!     .resolve(&current)?
//!     .apply(Box::new(NewRenderer));
//!
//! assert_eq!(renderer.render(), "old");
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod feature;
pub mod gate;
pub mod resolve;
pub mod scan;
pub mod version;

// Re-export commonly used types
pub use error::{BrintError, Result};
pub use feature::feature;
pub use gate::{GateDeclaration, Substitution};
pub use resolve::{CallSite, CurrentVersionSource};
pub use version::SemanticVersion;
