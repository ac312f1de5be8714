//! Logging infrastructure for the rollgen CLI.
//!
//! Structured logging via `tracing`, written to stderr so stdout carries only
//! the generated JSON.
//!
//! # Example
//!
//! ```rust,no_run
//! use rollgen_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//!
//! info!("generating targets");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_DIRECTIVES: &str = "rollgen=debug,rollgen_cli=debug";
const QUIET_DIRECTIVES: &str = "rollgen=error,rollgen_cli=error";
const DEFAULT_DIRECTIVES: &str = "rollgen=info,rollgen_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for rollgen crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for rollgen crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match fixed_directives(verbose, quiet) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES)),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Directives forced by command-line flags; `None` defers to `RUST_LOG`.
fn fixed_directives(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some(VERBOSE_DIRECTIVES)
    } else if quiet {
        Some(QUIET_DIRECTIVES)
    } else {
        None
    }
}

/// Check if colored output should be enabled on stderr.
///
/// - `NO_COLOR`: If set, disables colors
/// - `FORCE_COLOR`: If set, forces colors even in non-TTY
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
