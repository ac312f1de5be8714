//! rollgen CLI - bundler build targets from the command line.
//!
//! - [`cli`] - argument parsing and validation
//! - [`config`] - layered configuration (defaults, config file, CLI args)
//! - [`commands`] - the generate command
//! - [`error`] - error types and miette conversion
//! - [`logger`] - structured logging with tracing

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result};
