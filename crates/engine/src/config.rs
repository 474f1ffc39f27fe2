// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watcher configuration
//!
//! Loaded from TOML; every field has a default so a missing file is valid.
//!
//! ```toml
//! state_dir = "/var/lib/jobwatch"
//!
//! [lock]
//! stale_after = "1h"
//! reclaim_stale = true
//!
//! [scheduler]
//! source = "sacct"          # none | sacct | file
//! sacct_args = ["--format=JobID%30,JobName%40,State%30,ExitCode"]
//!
//! [notify]
//! webhook_url = "https://hooks.example.com/T000/B000"
//! channel = "#cryoem"
//!
//! [render]
//! command = "render-map"
//! args = ["{input}", "{output}", "--mode", "{mode}"]
//! ```

use jw_adapters::{
    AccountingFile, AccountingSource, CommandRenderer, NoAccounting, NoOpRenderer, Renderer,
    SacctCommand, WebhookNotifier,
};
use jw_storage::LockConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name of the configuration inside the state directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the default state directory
pub const STATE_DIR_ENV: &str = "JW_STATE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("scheduler source \"file\" requires scheduler.path")]
    MissingAccountingPath,
    #[error("cannot determine a state directory; set {STATE_DIR_ENV} or pass --state-dir")]
    NoStateDir,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    pub state_dir: Option<PathBuf>,
    pub lock: LockSection,
    pub scheduler: SchedulerSection,
    pub notify: NotifySection,
    pub render: RenderSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LockSection {
    #[serde(with = "humantime_serde")]
    pub stale_after: Duration,
    pub reclaim_stale: bool,
}

impl Default for LockSection {
    fn default() -> Self {
        let defaults = LockConfig::default();
        Self {
            stale_after: defaults.stale_after,
            reclaim_stale: defaults.reclaim_stale,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingKind {
    #[default]
    None,
    Sacct,
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerSection {
    pub source: AccountingKind,
    /// Captured accounting table (`source = "file"`)
    pub path: Option<PathBuf>,
    /// Accounting program (`source = "sacct"`), `sacct` when unset
    pub program: Option<String>,
    pub sacct_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifySection {
    pub webhook_url: Option<String>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub command: Option<String>,
    /// Argument template; `{input}`, `{output}` and `{mode}` are substituted
    pub args: Option<Vec<String>>,
}

impl WatchConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn lock_config(&self) -> LockConfig {
        LockConfig::default()
            .with_stale_after(self.lock.stale_after)
            .with_reclaim_stale(self.lock.reclaim_stale)
    }

    /// Accounting source selected by `[scheduler]`
    pub fn accounting(&self) -> Result<Box<dyn AccountingSource>, ConfigError> {
        Ok(match self.scheduler.source {
            AccountingKind::None => Box::new(NoAccounting),
            AccountingKind::Sacct => {
                let mut sacct = SacctCommand::new();
                if let Some(program) = &self.scheduler.program {
                    sacct = sacct.with_program(program.clone());
                }
                if let Some(args) = &self.scheduler.sacct_args {
                    sacct = sacct.with_args(args.clone());
                }
                Box::new(sacct)
            }
            AccountingKind::File => {
                let path = self
                    .scheduler
                    .path
                    .clone()
                    .ok_or(ConfigError::MissingAccountingPath)?;
                Box::new(AccountingFile::new(path))
            }
        })
    }

    /// Image renderer selected by `[render]`
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match &self.render.command {
            Some(command) => {
                let mut renderer = CommandRenderer::new(command.clone());
                if let Some(args) = &self.render.args {
                    renderer = renderer.with_args(args.clone());
                }
                Box::new(renderer)
            }
            None => Box::new(NoOpRenderer),
        }
    }

    /// Webhook transport, `None` when notifications are not configured
    pub fn notifier(&self) -> Option<WebhookNotifier> {
        let url = self.notify.webhook_url.as_ref()?;
        let mut notifier = WebhookNotifier::new(url.clone());
        if let Some(channel) = &self.notify.channel {
            notifier = notifier.with_channel(channel.clone());
        }
        Some(notifier)
    }
}

/// State directory when none is given: `$JW_STATE_DIR`, else the platform
/// data directory.
pub fn default_state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(STATE_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("jobwatch"))
        .ok_or(ConfigError::NoStateDir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
