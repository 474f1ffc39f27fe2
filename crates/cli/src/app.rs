// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved state directory, configuration and the watcher built from them

use anyhow::Result;
use jw_adapters::{
    AccountingSource, Renderer, TracedAccounting, TracedNotifyAdapter, TracedRenderer,
    WebhookNotifier,
};
use jw_core::SystemClock;
use jw_engine::{default_state_dir, WatchConfig, Watcher, WatcherDeps, CONFIG_FILE};
use std::path::{Path, PathBuf};

pub type CliWatcher = Watcher<
    TracedNotifyAdapter<Option<WebhookNotifier>>,
    TracedRenderer<Box<dyn Renderer>>,
    TracedAccounting<Box<dyn AccountingSource>>,
    SystemClock,
>;

/// Where state lives and which config applies.
///
/// An explicit `--state-dir` wins; otherwise the config's `state_dir`;
/// otherwise the default.
pub struct Paths {
    pub state_dir: PathBuf,
    pub config: WatchConfig,
}

impl Paths {
    pub fn resolve(state_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let bootstrap = match &state_dir {
            Some(dir) => dir.clone(),
            None => default_state_dir()?,
        };
        let config_path = config_path.unwrap_or_else(|| bootstrap.join(CONFIG_FILE));
        let config = WatchConfig::load(&config_path)?;
        let state_dir = state_dir
            .or_else(|| config.state_dir.clone())
            .unwrap_or(bootstrap);
        Ok(Self { state_dir, config })
    }
}

pub struct App {
    pub watcher: CliWatcher,
}

impl App {
    pub fn open(paths: &Paths) -> Result<Self> {
        Ok(Self {
            watcher: open_watcher(&paths.state_dir, &paths.config)?,
        })
    }
}

fn open_watcher(state_dir: &Path, config: &WatchConfig) -> Result<CliWatcher> {
    let deps = WatcherDeps {
        notify: TracedNotifyAdapter::new(config.notifier()),
        renderer: TracedRenderer::new(config.renderer()),
        accounting: TracedAccounting::new(config.accounting()?),
    };
    Ok(Watcher::open(
        state_dir,
        config.lock_config(),
        deps,
        SystemClock,
    )?)
}
