// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job status records
//!
//! The store performs no locking of its own; callers serialize access by
//! holding the pass lock.

use crate::json::{JsonStore, StorageError};
use jw_core::{JobId, StatusRecord};

const KIND: &str = "status";

#[derive(Debug, Clone)]
pub struct StatusStore {
    store: JsonStore,
}

impl StatusStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn get(&self, job: &JobId) -> Result<Option<StatusRecord>, StorageError> {
        self.store.load(KIND, &job.storage_key())
    }

    pub fn put(&self, record: &StatusRecord) -> Result<(), StorageError> {
        self.store.save(KIND, &record.job.storage_key(), record)
    }

    /// All records, ordered by job id
    pub fn list_all(&self) -> Result<Vec<StatusRecord>, StorageError> {
        let mut records = Vec::new();
        for key in self.store.list(KIND)? {
            if let Some(record) = self.store.load::<StatusRecord>(KIND, &key)? {
                records.push(record);
            }
        }
        records.sort_by(|a, b| a.job.cmp(&b.job));
        Ok(records)
    }

    /// Drop every record owned by a project. Returns how many were removed.
    pub fn purge_project(&self, project: &str) -> Result<usize, StorageError> {
        let mut removed = 0;
        for record in self.list_all()? {
            if record.project.as_deref() == Some(project)
                && self.store.delete(KIND, &record.job.storage_key())?
            {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
