//! Command-line argument definitions for the contact store
//!
//! Flags given here override values read from the environment.

use crate::config::AppConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the contact store
///
/// Serves a CSV contact file over a JSON API, or checks a file and prints
/// its validation report.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "contact-store",
    version,
    about = "Serve a CSV contact file over HTTP with row-level validation reporting",
    long_about = "Loads a four-column contact file (key, name, email, phone), keeps every \
                  rejected row with its diagnostics, and serves CRUD, search, pagination and \
                  validation reports over a JSON API. Every change is written back to the file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve(ServeArgs),
    /// Load a file and print its validation report
    Validate(ValidateArgs),
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Contact file to serve
    ///
    /// Defaults to $CONTACTS_FILE, then contacts.csv in the working directory.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Port to listen on (defaults to $PORT, then 8080)
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind (defaults to $HOST, then 0.0.0.0)
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Record count above which indexed lookups are used
    #[arg(long = "index-threshold", value_name = "COUNT")]
    pub index_threshold: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ServeArgs {
    /// Overlay the flags that were given onto `config`
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(file) = &self.file {
            config.store.source_path = file.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(threshold) = self.index_threshold {
            config.store.index_threshold = threshold;
        }
    }

    /// The server logs request activity, so it defaults to `info`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Contact file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Record count above which indexed lookups are used
    #[arg(long = "index-threshold", value_name = "COUNT")]
    pub index_threshold: Option<usize>,

    /// Number of rejected rows listed in the human report
    #[arg(long = "show-rows", value_name = "COUNT", default_value = "20")]
    pub show_rows: usize,

    /// Exit with an error if any row was rejected
    #[arg(long = "strict")]
    pub strict: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only log errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ValidateArgs {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Output format for the validation report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    Human,
    /// JSON for scripting
    Json,
}
