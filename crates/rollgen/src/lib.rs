//! # rollgen
//!
//! Bundler build targets for JavaScript library packages.
//!
//! Given a package's `package.json`, a global name for UMD bundles and an
//! optional set of overrides, [`generate`] returns the ordered list of
//! [`BuildJob`]s a bundler runs: CommonJS, ES and, for packages that publish
//! an `unpkg` entry, browser ES plus UMD development and production bundles.
//!
//! ```
//! use rollgen::{generate, Overrides, PackageDescriptor};
//!
//! let package = PackageDescriptor::new("acme-core");
//! let jobs = generate(&package, "AcmeCore", &Overrides::default());
//!
//! assert_eq!(jobs.len(), 2);
//! assert_eq!(jobs[0].output_file(), Some("lib/acme-core.js"));
//! assert_eq!(jobs[1].output_file(), Some("es/acme-core.js"));
//! ```

pub mod descriptor;
pub mod error;
pub mod generator;
pub mod overrides;
pub mod package;
pub mod plugin;

// Re-export main types
pub use descriptor::{
    BuildJob, DEFAULT_INPUT, ExternalSet, ModuleFormat, OutputOptions, Overridable,
};
pub use error::{Error, Result};
pub use generator::{BuildTarget, TargetGenerator, generate};
pub use overrides::Overrides;
pub use package::{MANIFEST_FILE, PackageDescriptor};
pub use plugin::{BuildMode, CompressOptions, NODE_ENV_TOKEN, PluginConfig, VENDOR_EXCLUDE};
