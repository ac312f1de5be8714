//! Plugin configuration records, in the shapes the bundler plugins accept.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Token replaced by the environment substitution plugin.
pub const NODE_ENV_TOKEN: &str = "process.env.NODE_ENV";

/// Glob excluded from transpilation in browser bundles.
pub const VENDOR_EXCLUDE: &str = "node_modules/**";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginConfig {
    /// Source transpilation (babel)
    #[serde(rename = "babel")]
    Transpile {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exclude: Option<String>,
    },

    /// CommonJS to ES interop
    #[serde(rename = "commonjs")]
    CommonJs,

    /// Resolve bare imports from `node_modules`
    NodeResolve {
        /// Prefer ES-module-aware package entries
        #[serde(default)]
        jsnext: bool,
    },

    /// Literal source substitution
    Replace { values: IndexMap<String, String> },

    /// Minification (terser)
    #[serde(rename = "terser")]
    Minify {
        #[serde(default)]
        compress: CompressOptions,
    },

    /// Records bundle sizes after each build
    SizeSnapshot,
}

impl PluginConfig {
    pub fn transpile() -> Self {
        PluginConfig::Transpile { exclude: None }
    }

    pub fn transpile_excluding(glob: impl Into<String>) -> Self {
        PluginConfig::Transpile {
            exclude: Some(glob.into()),
        }
    }

    pub fn node_resolve() -> Self {
        PluginConfig::NodeResolve { jsnext: true }
    }

    /// Pin `process.env.NODE_ENV` to the given mode
    ///
    /// # Example
    /// ```
    /// use rollgen::{BuildMode, PluginConfig};
    ///
    /// let plugin = PluginConfig::replace_node_env(BuildMode::Production);
    /// let PluginConfig::Replace { values } = plugin else { unreachable!() };
    /// assert_eq!(values["process.env.NODE_ENV"], "\"production\"");
    /// ```
    pub fn replace_node_env(mode: BuildMode) -> Self {
        let mut values = IndexMap::new();
        values.insert(NODE_ENV_TOKEN.to_string(), mode.replacement_literal());
        PluginConfig::Replace { values }
    }

    pub fn minify() -> Self {
        PluginConfig::Minify {
            compress: CompressOptions::aggressive(),
        }
    }

    /// Bundler plugin id
    pub fn id(&self) -> &'static str {
        match self {
            PluginConfig::Transpile { .. } => "babel",
            PluginConfig::CommonJs => "commonjs",
            PluginConfig::NodeResolve { .. } => "node-resolve",
            PluginConfig::Replace { .. } => "replace",
            PluginConfig::Minify { .. } => "terser",
            PluginConfig::SizeSnapshot => "size-snapshot",
        }
    }
}

/// Terser `compress` options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompressOptions {
    #[serde(default)]
    pub pure_getters: bool,

    #[serde(default, rename = "unsafe")]
    pub unsafe_transforms: bool,

    #[serde(default)]
    pub unsafe_comps: bool,

    #[serde(default)]
    pub warnings: bool,
}

impl CompressOptions {
    /// Unsafe numeric, getter and comparison optimizations, no warnings.
    pub fn aggressive() -> Self {
        Self {
            pure_getters: true,
            unsafe_transforms: true,
            unsafe_comps: true,
            warnings: false,
        }
    }
}

/// Runtime mode baked into browser bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    /// The mode as a JavaScript string literal, quotes included
    pub fn replacement_literal(self) -> String {
        format!("\"{}\"", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plugins_serialize_with_bundler_ids() {
        let cases = [
            (PluginConfig::transpile(), json!({ "plugin": "babel" })),
            (
                PluginConfig::transpile_excluding(VENDOR_EXCLUDE),
                json!({ "plugin": "babel", "exclude": "node_modules/**" }),
            ),
            (PluginConfig::CommonJs, json!({ "plugin": "commonjs" })),
            (
                PluginConfig::node_resolve(),
                json!({ "plugin": "node-resolve", "jsnext": true }),
            ),
            (
                PluginConfig::replace_node_env(BuildMode::Development),
                json!({
                    "plugin": "replace",
                    "values": { "process.env.NODE_ENV": "\"development\"" }
                }),
            ),
            (PluginConfig::SizeSnapshot, json!({ "plugin": "size-snapshot" })),
        ];

        for (plugin, expected) in cases {
            assert_eq!(serde_json::to_value(&plugin).unwrap(), expected);
            assert_eq!(plugin.id(), expected["plugin"]);
        }
    }

    #[test]
    fn minify_uses_aggressive_compression() {
        assert_eq!(
            serde_json::to_value(PluginConfig::minify()).unwrap(),
            json!({
                "plugin": "terser",
                "compress": {
                    "pure_getters": true,
                    "unsafe": true,
                    "unsafe_comps": true,
                    "warnings": false
                }
            })
        );
    }

    #[test]
    fn replacement_literal_is_quoted() {
        assert_eq!(BuildMode::Production.replacement_literal(), "\"production\"");
        assert_eq!(BuildMode::Development.replacement_literal(), "\"development\"");
    }

    #[test]
    fn plugin_parses_from_json() {
        let plugin: PluginConfig = serde_json::from_value(json!({
            "plugin": "node-resolve",
            "jsnext": false
        }))
        .unwrap();
        assert_eq!(plugin, PluginConfig::NodeResolve { jsnext: false });
    }
}
