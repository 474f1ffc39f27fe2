// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock diagnostics and operator override

use crate::app::App;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum LockCommand {
    /// Show who holds the processing lock
    Status,
    /// Remove the lock record regardless of holder
    Clear,
}

pub fn handle(command: LockCommand, app: &App) -> anyhow::Result<()> {
    match command {
        LockCommand::Status => match app.watcher.lock_status()? {
            Some(status) => {
                println!(
                    "held by {} (pid {}) since {}, {}s ago{}",
                    status.record.holder,
                    status.record.pid,
                    status.record.acquired_at.format("%Y-%m-%d %H:%M:%S"),
                    status.age.as_secs(),
                    if status.stale { " [stale]" } else { "" }
                );
            }
            None => println!("not held"),
        },
        LockCommand::Clear => match app.watcher.clear_lock()? {
            Some(record) => println!("cleared lock held by {} (pid {})", record.holder, record.pid),
            None => println!("not held"),
        },
    }
    Ok(())
}
