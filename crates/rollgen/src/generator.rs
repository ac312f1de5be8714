//! Build-target generation.
//!
//! Every package gets a CommonJS and an ES build. Packages that publish an
//! `unpkg` entry additionally get a browser ES build and two UMD builds
//! (development and production). Jobs are always returned in that order.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::descriptor::{BuildJob, ExternalSet, ModuleFormat, OutputOptions};
use crate::error::{Error, Result};
use crate::overrides::Overrides;
use crate::package::PackageDescriptor;
use crate::plugin::{BuildMode, PluginConfig, VENDOR_EXCLUDE};

/// One of the five bundles a library package can ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildTarget {
    #[serde(rename = "commonjs")]
    CommonJs,
    #[serde(rename = "es")]
    EsModule,
    #[serde(rename = "browser-es")]
    BrowserEsModule,
    #[serde(rename = "umd-development")]
    UmdDevelopment,
    #[serde(rename = "umd-production")]
    UmdProduction,
}

impl BuildTarget {
    /// All targets in output order
    pub const ALL: [BuildTarget; 5] = [
        BuildTarget::CommonJs,
        BuildTarget::EsModule,
        BuildTarget::BrowserEsModule,
        BuildTarget::UmdDevelopment,
        BuildTarget::UmdProduction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BuildTarget::CommonJs => "commonjs",
            BuildTarget::EsModule => "es",
            BuildTarget::BrowserEsModule => "browser-es",
            BuildTarget::UmdDevelopment => "umd-development",
            BuildTarget::UmdProduction => "umd-production",
        }
    }

    /// Browser targets are only built for packages with an `unpkg` entry.
    pub fn is_browser(self) -> bool {
        !matches!(self, BuildTarget::CommonJs | BuildTarget::EsModule)
    }

    pub fn format(self) -> ModuleFormat {
        match self {
            BuildTarget::CommonJs => ModuleFormat::Cjs,
            BuildTarget::EsModule | BuildTarget::BrowserEsModule => ModuleFormat::Es,
            BuildTarget::UmdDevelopment | BuildTarget::UmdProduction => ModuleFormat::Umd,
        }
    }

    pub fn output_file(self, package_name: &str) -> String {
        match self {
            BuildTarget::CommonJs => format!("lib/{package_name}.js"),
            BuildTarget::EsModule => format!("es/{package_name}.js"),
            BuildTarget::BrowserEsModule => format!("es/{package_name}.mjs"),
            BuildTarget::UmdDevelopment => format!("dist/{package_name}.js"),
            BuildTarget::UmdProduction => format!("dist/{package_name}.min.js"),
        }
    }

    /// Value substituted for `process.env.NODE_ENV`, if any
    pub fn mode(self) -> Option<BuildMode> {
        match self {
            BuildTarget::CommonJs | BuildTarget::EsModule => None,
            BuildTarget::UmdDevelopment => Some(BuildMode::Development),
            BuildTarget::BrowserEsModule | BuildTarget::UmdProduction => {
                Some(BuildMode::Production)
            }
        }
    }

    /// Whether the bundle is run through terser
    pub fn is_minified(self) -> bool {
        matches!(self, BuildTarget::BrowserEsModule | BuildTarget::UmdProduction)
    }

    /// Plugin pipeline, in application order
    pub fn plugins(self) -> Vec<PluginConfig> {
        let Some(mode) = self.mode() else {
            return vec![PluginConfig::transpile(), PluginConfig::SizeSnapshot];
        };

        let mut plugins = vec![PluginConfig::CommonJs, PluginConfig::node_resolve()];
        if self.format() == ModuleFormat::Umd {
            plugins.push(PluginConfig::transpile_excluding(VENDOR_EXCLUDE));
        }
        plugins.push(PluginConfig::replace_node_env(mode));
        if self.is_minified() {
            plugins.push(PluginConfig::minify());
        }
        plugins.push(PluginConfig::SizeSnapshot);
        plugins
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BuildTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BuildTarget::ALL
            .into_iter()
            .find(|target| target.label() == s)
            .ok_or_else(|| Error::UnknownTarget(s.to_string()))
    }
}

/// Generates build jobs for one package.
///
/// # Example
///
/// ```
/// use rollgen::{Overrides, PackageDescriptor, TargetGenerator};
///
/// let package = PackageDescriptor::new("acme-widgets")
///     .with_peer_dependency("core-lib", "^2.0.0")
///     .with_unpkg("dist/acme-widgets.min.js");
///
/// let jobs = TargetGenerator::new(package).generate("AcmeWidgets", &Overrides::default());
///
/// assert_eq!(jobs.len(), 5);
/// assert_eq!(jobs[0].output_file(), Some("lib/acme-widgets.js"));
/// assert_eq!(jobs[4].output_file(), Some("dist/acme-widgets.min.js"));
/// assert_eq!(jobs[3].global_name(), Some("AcmeWidgets"));
/// ```
#[derive(Debug, Clone)]
pub struct TargetGenerator {
    package: PackageDescriptor,
}

impl TargetGenerator {
    pub fn new(package: PackageDescriptor) -> Self {
        Self { package }
    }

    /// Read `package.json` from a package directory
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        PackageDescriptor::discover(dir).map(Self::new)
    }

    pub fn package(&self) -> &PackageDescriptor {
        &self.package
    }

    /// Targets this package builds, in output order
    pub fn targets(&self) -> Vec<BuildTarget> {
        enabled_targets(&self.package)
    }

    pub fn generate(&self, global_name: &str, overrides: &Overrides) -> Vec<BuildJob> {
        generate(&self.package, global_name, overrides)
    }

    /// Generate only the requested targets, keeping output order.
    ///
    /// # Errors
    ///
    /// Returns `Error::TargetDisabled` if a browser target is requested for a
    /// package without an `unpkg` entry.
    pub fn generate_selected(
        &self,
        selected: &[BuildTarget],
        global_name: &str,
        overrides: &Overrides,
    ) -> Result<Vec<BuildJob>> {
        let enabled = self.targets();
        if let Some(target) = selected.iter().find(|target| !enabled.contains(target)) {
            return Err(Error::TargetDisabled {
                target: target.label().to_string(),
                package: self.package.name.clone(),
            });
        }

        let targets: Vec<BuildTarget> = enabled
            .into_iter()
            .filter(|target| selected.contains(target))
            .collect();
        Ok(build_jobs(&self.package, &targets, global_name, overrides))
    }
}

/// Generate the build jobs for `package`.
///
/// `global_name` is only used by UMD jobs. `overrides` is shallow-merged over
/// every job.
pub fn generate(
    package: &PackageDescriptor,
    global_name: &str,
    overrides: &Overrides,
) -> Vec<BuildJob> {
    build_jobs(package, &enabled_targets(package), global_name, overrides)
}

fn enabled_targets(package: &PackageDescriptor) -> Vec<BuildTarget> {
    let browser = package.browser_targets_enabled();
    BuildTarget::ALL
        .into_iter()
        .filter(|target| browser || !target.is_browser())
        .collect()
}

fn build_jobs(
    package: &PackageDescriptor,
    targets: &[BuildTarget],
    global_name: &str,
    overrides: &Overrides,
) -> Vec<BuildJob> {
    let external = Arc::new(package.external_set());

    debug!(
        package = %package.name,
        targets = ?targets.iter().map(|t| t.label()).collect::<Vec<_>>(),
        external = external.len(),
        overrides = !overrides.is_empty(),
        "generating build targets"
    );

    targets
        .iter()
        .map(|&target| build_job(package, target, global_name, &external, overrides))
        .collect()
}

fn build_job(
    package: &PackageDescriptor,
    target: BuildTarget,
    global_name: &str,
    external: &Arc<ExternalSet>,
    overrides: &Overrides,
) -> BuildJob {
    let mut output = OutputOptions::new(target.output_file(&package.name), target.format());
    if target.format().requires_global_name() {
        output = output.with_global_name(global_name);
    }

    trace!(build = %target, file = %output.file, "build job");

    let job = BuildJob::new(output, Arc::clone(external)).with_plugins(target.plugins());
    overrides.apply(job)
}
