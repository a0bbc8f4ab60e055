//! CLI struct definitions for the numcheck command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "numcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check stored numbers against the validation threshold"
)]
pub(crate) struct Cli {
    /// Data directory holding numbers.db and the audit log.
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create the numbers database
    Init,
    /// Record a value under an id (replaces any existing value)
    Put {
        #[clap(long, allow_hyphen_values = true)]
        id: i64,
        #[clap(long, allow_hyphen_values = true)]
        value: i64,
    },
    /// List stored ids and values
    List,
    /// Validate one id, or every id read from stdin
    Check(CheckCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct CheckCli {
    /// Check a single id instead of reading stdin.
    #[clap(long, allow_hyphen_values = true)]
    pub id: Option<i64>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}
