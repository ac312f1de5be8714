//! Command-line interface definition for rollgen.
//!
//! `rollgen [PACKAGE_DIR] --name <GLOBAL>` prints the build jobs for the
//! package as JSON. Logs go to stderr so stdout can be piped straight into a
//! bundler.

mod validation;

use std::path::PathBuf;

use clap::Parser;
use rollgen::BuildTarget;

pub use validation::parse_global;

/// rollgen - bundler build targets for library packages
#[derive(Parser, Debug)]
#[command(
    name = "rollgen",
    version,
    about = "Generate bundler build targets for a library package",
    long_about = "Reads package.json and prints the bundler jobs for the package as JSON:\n\
                  CommonJS and ES builds always, plus browser ES and UMD development/production\n\
                  builds when the package publishes an `unpkg` entry."
)]
pub struct Cli {
    /// Package directory containing package.json
    #[arg(value_name = "PACKAGE_DIR", default_value = ".")]
    pub package_dir: PathBuf,

    /// Global name exposed by the UMD bundles
    ///
    /// Must be a valid JavaScript identifier. Required when the package
    /// publishes an `unpkg` entry, unless set in the config file.
    #[arg(short = 'n', long = "name", value_name = "GLOBAL", value_parser = parse_global)]
    pub name: Option<String>,

    /// JSON file with fields merged over every generated job
    ///
    /// Replaces the `overrides` section of the config file.
    #[arg(long, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Config file (defaults to rollgen.config.json in the package directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only emit these targets
    ///
    /// One of: commonjs, es, browser-es, umd-development, umd-production.
    /// May be repeated.
    #[arg(short = 't', long = "target", value_name = "TARGET")]
    pub targets: Vec<BuildTarget>,

    /// Write the jobs to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
