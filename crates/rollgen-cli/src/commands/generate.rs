//! The generate command: load the package, build the jobs, print JSON.

use std::fs;

use rollgen::{BuildJob, TargetGenerator};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::GenerateConfig;
use crate::error::{ConfigError, Result};

/// Generate the build jobs described by `cli` and write them out.
pub fn execute(cli: &Cli) -> Result<()> {
    let jobs = generate_jobs(cli)?;
    let rendered = render(&jobs, cli.compact)?;

    match &cli.out {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))?;
            info!(path = %path.display(), jobs = jobs.len(), "wrote build targets");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Resolve configuration and generate jobs without writing anything.
pub fn generate_jobs(cli: &Cli) -> Result<Vec<BuildJob>> {
    let config = GenerateConfig::load(cli)?;
    let generator = TargetGenerator::discover(&cli.package_dir)?;
    let package = generator.package();

    // disabled targets are reported by generate_selected, not here
    let needs_name = generator.targets().into_iter().any(|target| {
        target.format().requires_global_name()
            && (config.targets.is_empty() || config.targets.contains(&target))
    });

    let global_name = match (&config.name, needs_name) {
        (Some(name), _) => name.clone(),
        (None, false) => String::new(),
        (None, true) => {
            return Err(ConfigError::MissingField {
                field: "name".to_string(),
                hint: format!(
                    "Package '{}' builds UMD bundles; pass --name <GLOBAL> or set \"name\" in the config file",
                    package.name
                ),
            }
            .into());
        }
    };

    let jobs = if config.targets.is_empty() {
        generator.generate(&global_name, &config.overrides)
    } else {
        generator.generate_selected(&config.targets, &global_name, &config.overrides)?
    };

    debug!(
        package = %package.name,
        overrides = !config.overrides.is_empty(),
        "resolved configuration"
    );
    info!(package = %package.name, jobs = jobs.len(), "generated build targets");

    Ok(jobs)
}

fn render(jobs: &[BuildJob], compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(jobs)?
    } else {
        serde_json::to_string_pretty(jobs)?
    };
    Ok(rendered)
}
