// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The processing pass, normally run from cron

use crate::app::App;
use clap::Args;
use jw_engine::{PassOptions, PassReport};

#[derive(Args)]
pub struct ProcessArgs {
    /// Only process this project (repeatable)
    #[arg(long = "project", value_name = "NAME")]
    projects: Vec<String>,
    /// Only process pure scheduler jobs
    #[arg(long, conflicts_with = "projects")]
    scheduler_only: bool,
    /// Reprocess jobs whose state did not change
    #[arg(long)]
    force: bool,
    /// Record transitions without sending notifications
    #[arg(long)]
    suppress: bool,
}

/// Run one pass and print what changed
pub fn handle(args: ProcessArgs, app: &App) -> anyhow::Result<PassReport> {
    let options = PassOptions {
        projects: args.projects,
        scheduler_only: args.scheduler_only,
        force: args.force,
        suppress: args.suppress,
    };
    let report = app.watcher.run_pass(&options)?;

    for committed in &report.committed {
        let note = if committed.delivered { "" } else { " (not sent)" };
        println!("{}: {}{}", committed.label, committed.transition, note);
    }
    for failure in &report.failures {
        eprintln!("failed: {}: {}", failure.job, failure.error);
    }
    println!(
        "{} jobs examined, {} changed, {} notified, {} failed",
        report.examined,
        report.committed.len(),
        report.delivered(),
        report.failures.len()
    );
    Ok(report)
}
