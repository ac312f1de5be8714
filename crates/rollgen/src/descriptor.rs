//! Build-job descriptors handed to the bundler.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::plugin::PluginConfig;

/// Entry point shared by every generated job.
pub const DEFAULT_INPUT: &str = "src/index.js";

/// Module names the bundler must not inline.
///
/// Built once per generation call and shared by every job through an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalSet(BTreeSet<String>);

impl ExternalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExternalSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Output module format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// CommonJS (`require`/`module.exports`)
    Cjs,
    /// ECMAScript modules. Bundlers fall back to this when no format is given.
    #[default]
    Es,
    /// Universal module definition, usable as a script tag or a module
    Umd,
}

impl ModuleFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleFormat::Cjs => "cjs",
            ModuleFormat::Es => "es",
            ModuleFormat::Umd => "umd",
        }
    }

    /// UMD bundles expose their exports on a global and need its name.
    pub fn requires_global_name(self) -> bool {
        matches!(self, ModuleFormat::Umd)
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Output file path, relative to the package root
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,

    #[serde(default)]
    pub format: ModuleFormat,

    /// Global export name (UMD only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Indent wrapper code (generated jobs always disable it)
    #[serde(default)]
    pub indent: bool,
}

impl OutputOptions {
    pub fn new(file: impl Into<String>, format: ModuleFormat) -> Self {
        Self {
            file: file.into(),
            format,
            name: None,
            indent: false,
        }
    }

    pub fn with_global_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A job field that is either generated or replaced by an override.
///
/// Replaced fields hold the override's JSON exactly as given and serialize
/// back unchanged, whatever its shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Overridable<T> {
    Typed(T),
    Raw(Value),
}

impl<T> Overridable<T> {
    /// The typed value, unless an override replaced it
    pub fn typed(&self) -> Option<&T> {
        match self {
            Overridable::Typed(value) => Some(value),
            Overridable::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            Overridable::Typed(_) => None,
            Overridable::Raw(value) => Some(value),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Overridable::Raw(_))
    }
}

impl<T: Serialize + DeserializeOwned> Overridable<T> {
    /// Typed when `value` converts to `T` and back without change, raw otherwise.
    pub fn from_json(value: Value) -> Self {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(typed) if serde_json::to_value(&typed).is_ok_and(|back| back == value) => {
                Overridable::Typed(typed)
            }
            _ => Overridable::Raw(value),
        }
    }
}

impl<T> From<T> for Overridable<T> {
    fn from(value: T) -> Self {
        Overridable::Typed(value)
    }
}

impl<T: Default> Default for Overridable<T> {
    fn default() -> Self {
        Overridable::Typed(T::default())
    }
}

impl<'de, T: Serialize + DeserializeOwned> Deserialize<'de> for Overridable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// One bundler invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildJob {
    pub input: Overridable<String>,

    pub output: Overridable<OutputOptions>,

    /// Dependencies left as imports. Shared by every job of one generation call.
    #[serde(default)]
    pub external: Overridable<Arc<ExternalSet>>,

    /// Plugins in application order
    #[serde(default)]
    pub plugins: Overridable<Vec<PluginConfig>>,

    /// Additional top-level bundler options supplied through overrides
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl BuildJob {
    pub fn new(output: OutputOptions, external: Arc<ExternalSet>) -> Self {
        Self {
            input: DEFAULT_INPUT.to_string().into(),
            output: output.into(),
            external: external.into(),
            plugins: Vec::new().into(),
            extra: IndexMap::new(),
        }
    }

    pub fn with_plugins(mut self, plugins: Vec<PluginConfig>) -> Self {
        self.plugins = plugins.into();
        self
    }

    pub fn output_file(&self) -> Option<&str> {
        match &self.output {
            Overridable::Typed(output) => Some(&output.file),
            Overridable::Raw(value) => value.get("file")?.as_str(),
        }
    }

    pub fn format(&self) -> Option<ModuleFormat> {
        match &self.output {
            Overridable::Typed(output) => Some(output.format),
            Overridable::Raw(value) => ModuleFormat::deserialize(value.get("format")?).ok(),
        }
    }

    pub fn global_name(&self) -> Option<&str> {
        match &self.output {
            Overridable::Typed(output) => output.name.as_deref(),
            Overridable::Raw(value) => value.get("name")?.as_str(),
        }
    }

    /// Whether both jobs reference the same external set allocation
    pub fn shares_external_with(&self, other: &BuildJob) -> bool {
        match (&self.external, &other.external) {
            (Overridable::Typed(a), Overridable::Typed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Create from serde_json::Value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidJob(e.to_string()))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::InvalidJob(e.to_string()))
    }
}
