//! Caller-supplied fields merged over every generated job.
//!
//! The merge is shallow: each top-level key of the override record replaces
//! the job's field of the same name with the override's value, exactly as
//! given. Setting `output` swaps the entire output record, so fields the
//! override leaves out are simply absent. Nothing checks the merged job
//! afterwards, so any shape the bundler accepts can be passed through.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::{BuildJob, Overridable};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(IndexMap<String, Value>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from serde_json::Value
    ///
    /// # Example
    ///
    /// ```
    /// use rollgen::Overrides;
    /// use serde_json::json;
    ///
    /// let overrides = Overrides::from_value(json!({
    ///     "output": { "file": "x.js", "sourcemap": true },
    ///     "treeshake": false
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(overrides.get("output"), Some(&json!({ "file": "x.js", "sourcemap": true })));
    /// assert_eq!(overrides.get("treeshake"), Some(&json!(false)));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidOverride(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| Error::InvalidOverride(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Set a top-level field; a later write to the same key wins.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Shallow-merge these overrides over `job`; overrides win.
    pub fn apply(&self, mut job: BuildJob) -> BuildJob {
        for (key, value) in &self.0 {
            let value = value.clone();
            match key.as_str() {
                "input" => job.input = Overridable::Raw(value),
                "output" => job.output = Overridable::Raw(value),
                "external" => job.external = Overridable::Raw(value),
                "plugins" => job.plugins = Overridable::Raw(value),
                _ => {
                    job.extra.insert(key.clone(), value);
                }
            }
        }
        job
    }
}
