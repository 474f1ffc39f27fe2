// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler name pattern commands

use crate::app::App;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PatternCommand {
    /// Watch scheduler jobs whose name matches a regular expression
    Add { pattern: String },
    /// Stop watching a pattern
    Remove { pattern: String },
    /// List watched patterns
    List,
}

pub fn handle(command: PatternCommand, app: &App) -> anyhow::Result<()> {
    match command {
        PatternCommand::Add { pattern } => {
            if app.watcher.add_pattern(&pattern)? {
                println!("Watching scheduler jobs matching {pattern}");
            } else {
                println!("Already watching {pattern}");
            }
        }
        PatternCommand::Remove { pattern } => {
            if app.watcher.remove_pattern(&pattern)? {
                println!("Stopped watching {pattern}");
            } else {
                println!("Pattern not found: {pattern}");
            }
        }
        PatternCommand::List => {
            let patterns = app.watcher.patterns()?;
            if patterns.is_empty() {
                println!("No patterns (every scheduler job is watched)");
            }
            for pattern in patterns {
                println!("{pattern}");
            }
        }
    }
    Ok(())
}
