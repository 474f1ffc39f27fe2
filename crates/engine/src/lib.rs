// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Job watcher engine: evidence, state resolution and diff & dispatch

pub mod config;
mod discovery;
mod error;
pub mod evidence;
pub mod handlers;
mod resolver;
pub mod star;
mod watcher;

pub use config::{default_state_dir, ConfigError, WatchConfig, CONFIG_FILE, STATE_DIR_ENV};
pub use discovery::{discover_jobs, parse_job_dir, Discovery};
pub use error::EngineError;
pub use handlers::{HandlerContext, HandlerError};
pub use resolver::{markers_state, resolve};
pub use watcher::{
    Committed, JobFailure, JobView, LockStatus, PassOptions, PassReport, Watcher, WatcherDeps,
    STATUS_MARKER,
};
