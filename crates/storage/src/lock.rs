// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-process pass lock with stale detection and reclaim
//!
//! The lock is a record file (`lock.json`) naming the holder. Creating,
//! reclaiming and removing the record happens under an exclusive advisory
//! lock on `lock.guard`, so overlapping invocations serialize on the check.
//! A holder killed mid-pass leaves the record behind; once it is older than
//! `stale_after` it is reported stale and may be reclaimed or force-cleared.

use crate::json::{write_atomic, StorageError};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use jw_core::Clock;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const RECORD_FILE: &str = "lock.json";
const GUARD_FILE: &str = "lock.guard";

#[derive(Debug, Error)]
pub enum LockError {
    #[error("lock held by {holder} (pid {pid}) since {since}{}", stale_suffix(.stale))]
    Held {
        holder: String,
        pid: u32,
        since: DateTime<Utc>,
        stale: bool,
    },
    #[error("lock io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn stale_suffix(stale: &bool) -> &'static str {
    if *stale {
        " (stale)"
    } else {
        ""
    }
}

impl LockError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Lock configuration
#[derive(Debug, Clone)]
pub struct LockConfig {
    /// Age after which a held lock is considered abandoned
    pub stale_after: Duration,
    /// Whether `acquire` takes over a stale lock on its own
    pub reclaim_stale: bool,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(60 * 60),
            reclaim_stale: true,
        }
    }
}

impl LockConfig {
    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn with_reclaim_stale(mut self, reclaim_stale: bool) -> Self {
        self.reclaim_stale = reclaim_stale;
        self
    }
}

/// Who holds the lock, as persisted on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    pub holder: String,
    pub pid: u32,
    pub acquired_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LockManager<C: Clock> {
    record_path: PathBuf,
    guard_path: PathBuf,
    config: LockConfig,
    clock: C,
}

impl<C: Clock> LockManager<C> {
    pub fn new(state_dir: &Path, config: LockConfig, clock: C) -> Self {
        Self {
            record_path: state_dir.join(RECORD_FILE),
            guard_path: state_dir.join(GUARD_FILE),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// Take the lock for one processing pass.
    ///
    /// Fails with [`LockError::Held`] while another live holder exists.
    pub fn acquire(&self) -> Result<LockHandle, LockError> {
        let _guard = guard(&self.guard_path)?;

        if let Some(current) = read_record(&self.record_path)? {
            let stale = self.is_record_stale(&current);
            if !stale || !self.config.reclaim_stale {
                return Err(LockError::Held {
                    holder: current.holder,
                    pid: current.pid,
                    since: current.acquired_at,
                    stale,
                });
            }
            tracing::warn!(
                previous_holder = %current.holder,
                previous_pid = current.pid,
                since = %current.acquired_at,
                "reclaiming stale lock"
            );
        }

        let record = LockRecord {
            holder: uuid::Uuid::new_v4().to_string(),
            pid: std::process::id(),
            acquired_at: self.clock.now(),
        };
        let json = serde_json::to_vec_pretty(&record).map_err(|source| StorageError::Json {
            path: self.record_path.clone(),
            source,
        })?;
        write_atomic(&self.record_path, &json)?;
        tracing::debug!(holder = %record.holder, "lock acquired");

        Ok(LockHandle {
            record_path: self.record_path.clone(),
            guard_path: self.guard_path.clone(),
            holder: record.holder,
            released: false,
        })
    }

    /// Release a handle. Releasing twice is harmless.
    pub fn release(&self, handle: LockHandle) -> Result<(), LockError> {
        handle.release()
    }

    /// Current holder, if any
    pub fn status(&self) -> Result<Option<LockRecord>, LockError> {
        read_record(&self.record_path)
    }

    /// True when the lock is held and older than the staleness threshold
    pub fn is_stale(&self) -> Result<bool, LockError> {
        Ok(self
            .status()?
            .is_some_and(|record| self.is_record_stale(&record)))
    }

    /// Remove the lock record regardless of holder. Returns what was cleared.
    pub fn force_clear(&self) -> Result<Option<LockRecord>, LockError> {
        let _guard = guard(&self.guard_path)?;
        let previous = read_record(&self.record_path)?;
        remove_record(&self.record_path)?;
        if let Some(record) = &previous {
            tracing::warn!(holder = %record.holder, pid = record.pid, "lock force-cleared");
        }
        Ok(previous)
    }

    /// How long the given record has been held
    pub fn age(&self, record: &LockRecord) -> Duration {
        (self.clock.now() - record.acquired_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    fn is_record_stale(&self, record: &LockRecord) -> bool {
        self.age(record) > self.config.stale_after
    }
}

/// Scoped ownership of the pass lock; dropping it releases the lock
#[derive(Debug)]
pub struct LockHandle {
    record_path: PathBuf,
    guard_path: PathBuf,
    holder: String,
    released: bool,
}

impl LockHandle {
    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn release(mut self) -> Result<(), LockError> {
        self.released = true;
        release_record(&self.record_path, &self.guard_path, &self.holder)
    }
}

impl Drop for LockHandle {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = release_record(&self.record_path, &self.guard_path, &self.holder) {
            tracing::error!(holder = %self.holder, error = %e, "failed to release lock");
        }
    }
}

fn release_record(record_path: &Path, guard_path: &Path, holder: &str) -> Result<(), LockError> {
    let _guard = guard(guard_path)?;
    match read_record(record_path)? {
        Some(record) if record.holder == holder => {
            remove_record(record_path)?;
            tracing::debug!(holder, "lock released");
        }
        Some(record) => {
            // Someone reclaimed or force-cleared and re-took the lock meanwhile
            tracing::warn!(holder, current = %record.holder, "lock no longer ours, leaving it");
        }
        None => {}
    }
    Ok(())
}

/// Exclusive advisory lock on the guard file, released when the file drops
fn guard(path: &Path) -> Result<File, LockError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LockError::io(parent, e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| LockError::io(path, e))?;
    file.lock_exclusive().map_err(|e| LockError::io(path, e))?;
    Ok(file)
}

fn read_record(path: &Path) -> Result<Option<LockRecord>, LockError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LockError::io(path, e)),
    };
    match serde_json::from_slice(&bytes) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            // Unreadable record: treat as held since the epoch so it is stale
            tracing::warn!(path = %path.display(), error = %e, "unreadable lock record");
            Ok(Some(LockRecord {
                holder: "unknown".to_string(),
                pid: 0,
                acquired_at: DateTime::<Utc>::UNIX_EPOCH,
            }))
        }
    }
}

fn remove_record(path: &Path) -> Result<(), LockError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LockError::io(path, e)),
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
