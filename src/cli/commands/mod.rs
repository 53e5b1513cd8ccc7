//! Command implementations for the contact store CLI
//!
//! Each subcommand lives in its own module:
//! - `serve`: load the contact file and run the HTTP API
//! - `validate`: load a file and print its validation report

pub mod serve;
pub mod shared;
pub mod validate;

use anyhow::Result;

use crate::cli::args::{Args, Commands};

/// Dispatch to the selected subcommand
///
/// Callers are expected to handle a missing subcommand before calling this.
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Serve(serve_args)) => serve::run_serve(serve_args).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        None => anyhow::bail!("No command given; run with --help for usage"),
    }
}
