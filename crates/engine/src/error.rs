// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the watcher

use crate::config::ConfigError;
use jw_storage::{LockError, RegistryError, StorageError};
use thiserror::Error;

/// Errors that abort an operation or a whole pass.
///
/// Per-job handler failures are not here; they are reported in the pass
/// report and retried on the next pass.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// True when another pass holds the lock
    pub fn is_lock_held(&self) -> bool {
        matches!(self, EngineError::Lock(LockError::Held { .. }))
    }
}
