//! Error handling for the rollgen CLI.
//!
//! `CliError` wraps the library error and the CLI's own configuration errors.
//! `main` converts it into a `miette::Report` for display.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (config file, missing settings)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Package loading or target selection errors
    #[error("{0}")]
    Package(#[from] rollgen::Error),

    /// I/O errors from writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the given location
    #[error("Config file not found: {}\n\nHint: Check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Package(rollgen::Error::TargetDisabled { target, package }) => miette::miette!(
            help = "Add an `unpkg` field to package.json or drop the --target filter",
            "Target '{}' is not built for package '{}'",
            target,
            package
        ),
        CliError::Package(rollgen::Error::MissingName) => miette::miette!(
            help = "Add a non-empty \"name\" field to package.json",
            "Package manifest has no name"
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_errors_display_without_prefix() {
        let err = CliError::from(rollgen::Error::UnknownTarget("iife".to_string()));
        assert_eq!(err.to_string(), "unknown build target: iife");
    }

    #[test]
    fn missing_field_includes_hint() {
        let err = CliError::from(ConfigError::MissingField {
            field: "name".to_string(),
            hint: "Pass --name".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field: name\n\nHint: Pass --name"
        );
    }

    #[test]
    fn disabled_target_report_mentions_target() {
        let report = cli_error_to_miette(CliError::from(rollgen::Error::TargetDisabled {
            target: "umd-production".to_string(),
            package: "acme-core".to_string(),
        }));
        assert!(report.to_string().contains("umd-production"));
    }
}
