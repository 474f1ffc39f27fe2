// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! How density maps are pictured in notifications

use crate::app::App;
use clap::Args;
use jw_core::DisplayMode;

#[derive(Args)]
pub struct DisplayArgs {
    /// `slice` or `projection`; omit to show the current mode
    mode: Option<DisplayMode>,
}

pub fn handle(args: DisplayArgs, app: &App) -> anyhow::Result<()> {
    match args.mode {
        Some(mode) => {
            app.watcher.set_display_mode(mode)?;
            println!("Display mode set to {mode}");
        }
        None => println!("{}", app.watcher.display_mode()?),
    }
    Ok(())
}
