// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake accounting source for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AccountingError, AccountingSource};
use std::sync::{Arc, Mutex};

/// Serves whatever table the test last set
#[derive(Clone, Default)]
pub struct FakeAccounting {
    table: Arc<Mutex<Option<String>>>,
}

impl FakeAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: impl Into<String>) -> Self {
        let fake = Self::new();
        fake.set(table);
        fake
    }

    pub fn set(&self, table: impl Into<String>) {
        *self.table.lock().unwrap_or_else(|e| e.into_inner()) = Some(table.into());
    }

    /// Make the next fetches fail
    pub fn set_unavailable(&self) {
        *self.table.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl AccountingSource for FakeAccounting {
    fn fetch(&self) -> Result<String, AccountingError> {
        self.table
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| AccountingError::Failed {
                program: "fake-sacct".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "accounting unavailable".to_string(),
            })
    }
}
