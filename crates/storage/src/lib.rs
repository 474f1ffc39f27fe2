// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable watcher state: registry, status records and the pass lock
//!
//! Everything lives under one state directory:
//!
//! ```text
//! <state_dir>/
//!   projects/<name>.json
//!   patterns/watched.json
//!   settings/preferences.json
//!   status/<job-key>.json
//!   lock.json
//!   lock.guard
//! ```

mod json;
mod lock;
mod registry;
mod status;

pub use json::{JsonStore, StorageError};
pub use lock::{LockConfig, LockError, LockHandle, LockManager, LockRecord};
pub use registry::{Preferences, Registry, RegistryError};
pub use status::StatusStore;
