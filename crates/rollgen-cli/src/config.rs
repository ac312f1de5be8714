//! Layered configuration for the rollgen CLI.
//!
//! Priority: CLI args > config file > defaults. The `--overrides` file, when
//! given, replaces the config file's `overrides` section wholesale.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format as _, Json, Serialized},
};
use rollgen::{BuildTarget, Overrides};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{Cli, parse_global};
use crate::error::{ConfigError, Result};

/// Config file looked up in the package directory
pub const CONFIG_FILE: &str = "rollgen.config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Global name for UMD bundles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Fields merged over every generated job
    #[serde(default)]
    pub overrides: Overrides,

    /// Restrict output to these targets (empty = all enabled targets)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<BuildTarget>,
}

/// Only the values actually passed on the command line
#[derive(Debug, Default, Serialize)]
struct CliLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    targets: Vec<BuildTarget>,
}

impl GenerateConfig {
    /// Load configuration from defaults, the config file and CLI args.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file(cli)? {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(Serialized::defaults(CliLayer {
            name: cli.name.clone(),
            targets: cli.targets.clone(),
        }));

        let mut config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: format!("Check {} syntax and field types", CONFIG_FILE),
        })?;

        if let Some(name) = &config.name {
            parse_global(name).map_err(|hint| ConfigError::InvalidValue {
                field: "name".to_string(),
                value: name.clone(),
                hint,
            })?;
        }

        if let Some(path) = &cli.overrides {
            config.overrides = load_overrides(path)?;
        }

        Ok(config)
    }
}

fn config_file(cli: &Cli) -> Result<Option<PathBuf>> {
    match &cli.config {
        Some(path) if !path.exists() => Err(ConfigError::NotFound(path.clone()).into()),
        Some(path) => Ok(Some(path.clone())),
        None => {
            let default_path = cli.package_dir.join(CONFIG_FILE);
            Ok(default_path.exists().then_some(default_path))
        }
    }
}

fn load_overrides(path: &Path) -> Result<Overrides> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }
    let content = fs::read_to_string(path)?;
    Ok(Overrides::from_json_str(&content)?)
}
