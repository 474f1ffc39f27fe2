// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded job states

use crate::app::App;
use crate::output::{print_list, OutputFormat};
use chrono::{DateTime, Utc};
use clap::Args;
use jw_core::JobState;
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct StatusArgs {
    /// Only show records of this project
    #[arg(long)]
    project: Option<String>,
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct StatusInfo {
    job: String,
    project: Option<String>,
    state: JobState,
    updated_at: DateTime<Utc>,
}

impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<32} {:<10} {}",
            self.job,
            self.state,
            self.updated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

pub fn handle(args: StatusArgs, app: &App) -> anyhow::Result<()> {
    let records: Vec<StatusInfo> = app
        .watcher
        .status_records()?
        .into_iter()
        .filter(|r| args.project.is_none() || r.project == args.project)
        .map(|r| StatusInfo {
            job: r.job.0,
            project: r.project,
            state: r.state,
            updated_at: r.updated_at,
        })
        .collect();
    print_list(&records, args.format, "No job records");
    Ok(())
}
