//! Error types for package loading, override parsing and target selection.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // Package manifest errors
    #[error("invalid package manifest ({origin}): {hint}")]
    InvalidManifest { origin: String, hint: String },

    #[error("package manifest has no name")]
    MissingName,

    // Override parsing errors (shape only, merged jobs are never validated)
    #[error("invalid overrides: {0}")]
    InvalidOverride(String),

    #[error("invalid build job: {0}")]
    InvalidJob(String),

    // Target selection errors
    #[error("unknown build target: {0}")]
    UnknownTarget(String),

    #[error("build target '{target}' requires an `unpkg` field in package '{package}'")]
    TargetDisabled { target: String, package: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
