//! numcheck: a number service with an injected store.
//!
//! A [`NumberService`](service::NumberService) depends on the
//! [`NumberStore`](core::store::NumberStore) capability and nothing else. The
//! binary injects the SQLite-backed [`SqliteStore`](core::db::SqliteStore);
//! tests inject a mockall double.
//!
//! # Validation
//!
//! - Lookup fails: the store's error is returned as is.
//! - Value above 10: `result too high: <value>`.
//! - Anything else is valid.
//!
//! # Examples
//!
//! ```bash
//! numcheck init
//! numcheck put --id 2 --value 7
//! numcheck check --id 2
//! printf '1\n2\n' | numcheck check --format json
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: store capability, SQLite backing, audit broker, errors, config
//! - [`service`]: the validation service in struct and closure form
//! - [`check`]: the stdin check loop

pub mod check;
mod cli;
pub mod core;
pub mod service;

use crate::check::OutputFormat;
use crate::cli::{CheckCli, Cli, Command};
use crate::core::config::{self, Settings};
use crate::core::db::SqliteStore;
use crate::core::error::NumcheckError;
use crate::service::NumberService;

use clap::Parser;
use colored::Colorize;
use std::io;
use std::process::ExitCode;

pub fn run() -> Result<ExitCode, NumcheckError> {
    let cli = Cli::parse();
    let current_dir = std::env::current_dir()?;
    let settings = config::resolve(&current_dir, cli.root, config::root_from_env())?;

    match cli.command {
        Some(Command::Init) => {
            let store = SqliteStore::open(&settings.root, &settings.actor)?;
            println!(
                "{} {}",
                "Numbers database initialized at".green(),
                store.db_path().display()
            );
        }
        Some(Command::Put { id, value }) => {
            let store = SqliteStore::open(&settings.root, &settings.actor)?;
            store.put(id, value)?;
            println!("Recorded {} = {}", id, value);
        }
        Some(Command::List) => {
            let store = SqliteStore::open(&settings.root, &settings.actor)?;
            for (id, value) in store.list()? {
                println!("{}\t{}", id, value);
            }
        }
        Some(Command::Check(check_cli)) => return run_check(&settings, check_cli),
        None => {
            return run_check(
                &settings,
                CheckCli {
                    id: None,
                    format: "text".to_string(),
                },
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_check(settings: &Settings, cli: CheckCli) -> Result<ExitCode, NumcheckError> {
    let format: OutputFormat = cli.format.parse()?;
    let store = SqliteStore::open(&settings.root, &settings.actor)?;
    let service = NumberService::new(store);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.id {
        Some(id) => {
            let outcome = check::check_id(&service, id);
            check::write_outcome(&mut out, &outcome, format)?;
            if outcome.is_valid() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        None => {
            let stdin = io::stdin();
            let summary = check::run_check_loop(&service, stdin.lock(), &mut out, format)?;
            // stdout stays one line per id; totals go to stderr
            if format == OutputFormat::Text {
                eprintln!("{}", summary);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
