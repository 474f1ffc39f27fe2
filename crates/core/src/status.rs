// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted per-job status records

use crate::job::{JobId, JobState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last state that was successfully processed for a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub job: JobId,
    /// Owning project, used to purge records when the project is removed
    #[serde(default)]
    pub project: Option<String>,
    pub state: JobState,
    pub updated_at: DateTime<Utc>,
    /// Fingerprint of the payload produced for `state`
    #[serde(default)]
    pub fingerprint: Option<String>,
}

impl StatusRecord {
    pub fn new(job: JobId, state: JobState, updated_at: DateTime<Utc>) -> Self {
        Self {
            job,
            project: None,
            state,
            updated_at,
            fingerprint: None,
        }
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }
}
