// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw - cluster and pipeline job watcher

mod app;
mod commands;
mod error;
mod logging;
mod output;

use crate::app::{App, Paths};
use crate::error::JwError;
use clap::{Parser, Subcommand};
use commands::{display, lock, pattern, process, project, status};
use jw_engine::{EngineError, STATE_DIR_ENV};
use std::path::PathBuf;
use std::process::ExitCode;

/// Another pass holds the lock (EX_TEMPFAIL)
const EXIT_BUSY: u8 = 75;
/// The pass completed but some jobs failed and will be retried
const EXIT_JOB_FAILURES: u8 = 2;

#[derive(Parser)]
#[command(
    name = "jw",
    version,
    about = "Watch cluster and pipeline jobs, notify once per state change"
)]
struct Cli {
    /// State directory (registry, job records, lock, log)
    #[arg(long, global = true, env = STATE_DIR_ENV)]
    state_dir: Option<PathBuf>,

    /// Config file, defaults to <state-dir>/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watched pipeline projects
    #[command(subcommand)]
    Project(project::ProjectCommand),
    /// Scheduler job name patterns
    #[command(subcommand)]
    Pattern(pattern::PatternCommand),
    /// Run one processing pass
    Process(process::ProcessArgs),
    /// Recorded job states
    Status(status::StatusArgs),
    /// Processing lock
    #[command(subcommand)]
    Lock(lock::LockCommand),
    /// Map display mode for notifications
    Display(display::DisplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => report(&err),
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let paths = Paths::resolve(cli.state_dir, cli.config)?;
    let _log_guard = logging::setup_logging(&paths.state_dir)?;
    tracing::debug!(state_dir = %paths.state_dir.display(), "jw starting");
    let app = App::open(&paths)?;

    match cli.command {
        Commands::Project(command) => project::handle(command, &app)?,
        Commands::Pattern(command) => pattern::handle(command, &app)?,
        Commands::Process(args) => {
            let report = process::handle(args, &app)?;
            if report.has_failures() {
                return Ok(ExitCode::from(EXIT_JOB_FAILURES));
            }
        }
        Commands::Status(args) => status::handle(args, &app)?,
        Commands::Lock(command) => lock::handle(command, &app)?,
        Commands::Display(args) => display::handle(args, &app)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn report(err: &anyhow::Error) -> ExitCode {
    let engine = err.downcast_ref::<EngineError>();
    match engine.and_then(JwError::from_engine) {
        Some(friendly) => eprint!("{friendly}"),
        None => eprintln!("error: {err:#}"),
    }
    if engine.is_some_and(EngineError::is_lock_held) {
        ExitCode::from(EXIT_BUSY)
    } else {
        ExitCode::FAILURE
    }
}
