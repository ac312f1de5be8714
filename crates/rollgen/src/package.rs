//! Package metadata read from `package.json`.
//!
//! Only three fields drive target generation: `name`, `peerDependencies` and
//! `unpkg`. Everything else in the manifest is kept in [`PackageDescriptor::other`]
//! untouched.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::descriptor::ExternalSet;
use crate::error::{Error, Result};

/// Manifest file name looked up inside a package directory.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    /// Package name, used verbatim in every output path
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Peer dependencies (name -> version range). Never bundled.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub peer_dependencies: IndexMap<String, String>,

    /// Browser entry published to CDNs. Only its truthiness is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpkg: Option<Value>,

    /// Remaining manifest fields
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a peer dependency
    ///
    /// # Example
    /// ```
    /// use rollgen::PackageDescriptor;
    ///
    /// let package = PackageDescriptor::new("acme-widgets")
    ///     .with_peer_dependency("core-lib", "^2.0.0")
    ///     .with_unpkg("dist/acme-widgets.min.js");
    ///
    /// assert!(package.external_set().contains("core-lib"));
    /// assert!(package.browser_targets_enabled());
    /// ```
    pub fn with_peer_dependency(
        mut self,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.peer_dependencies.insert(name.into(), range.into());
        self
    }

    pub fn with_unpkg(mut self, unpkg: impl Into<Value>) -> Self {
        self.unpkg = Some(unpkg.into());
        self
    }

    /// Whether browser bundles (browser ES, UMD dev/prod) should be built.
    ///
    /// Follows JavaScript truthiness of `unpkg`: `null`, `false`, `0` and `""`
    /// all disable browser targets, as does a missing field.
    pub fn browser_targets_enabled(&self) -> bool {
        self.unpkg.as_ref().is_some_and(is_truthy)
    }

    /// Names the bundler must leave as imports.
    pub fn external_set(&self) -> ExternalSet {
        self.peer_dependencies.keys().cloned().collect()
    }

    /// Create from serde_json::Value
    ///
    /// # Example
    ///
    /// ```
    /// use rollgen::PackageDescriptor;
    /// use serde_json::json;
    ///
    /// let package = PackageDescriptor::from_value(json!({
    ///     "name": "acme-core",
    ///     "version": "1.0.0"
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(package.name, "acme-core");
    /// assert!(package.external_set().is_empty());
    /// assert!(!package.browser_targets_enabled());
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_at(value, "<value>")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_str_at(content, "<string>")
    }

    /// Load a manifest file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file can't be read, `Error::InvalidManifest`
    /// for malformed JSON and `Error::MissingName` when `name` is absent or empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let package = Self::from_str_at(&content, &path.display().to_string())?;

        debug!(
            path = %path.display(),
            package = %package.name,
            peers = package.peer_dependencies.len(),
            browser = package.browser_targets_enabled(),
            "loaded package manifest"
        );

        Ok(package)
    }

    /// Load `package.json` from a package directory
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(dir.as_ref().join(MANIFEST_FILE))
    }

    fn from_str_at(content: &str, origin: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| Error::InvalidManifest {
            origin: origin.to_string(),
            hint: format!("Invalid JSON: {}", e),
        })?;
        Self::from_value_at(value, origin)
    }

    fn from_value_at(value: Value, origin: &str) -> Result<Self> {
        let package: Self = serde_json::from_value(value).map_err(|e| Error::InvalidManifest {
            origin: origin.to_string(),
            hint: e.to_string(),
        })?;

        if package.name.is_empty() {
            return Err(Error::MissingName);
        }

        Ok(package)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
