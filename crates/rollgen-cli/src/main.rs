//! rollgen CLI entry point: argument parsing, logging setup and dispatch.

use clap::Parser;
use miette::Result;
use rollgen_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    commands::generate_execute(&args).map_err(error::cli_error_to_miette)
}
