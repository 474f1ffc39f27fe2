// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watched pipeline projects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File at a project root that identifies a pipeline project
pub const MANIFEST_FILE: &str = "default_pipeline.star";

/// A pipeline project root registered for watching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub root: PathBuf,
    /// Prefix linking scheduler job names (`<tag>J<seq>`) to this project's jobs
    #[serde(default)]
    pub tag: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, added_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            tag: None,
            added_at,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Best-effort check that a directory is a pipeline project root
    pub fn is_pipeline_root(path: &Path) -> bool {
        path.join(MANIFEST_FILE).is_file()
    }

    /// Scheduler job name expected for a job of this project, if tagged
    pub fn scheduler_name(&self, seq: u32) -> Option<String> {
        self.tag.as_ref().map(|tag| format!("{}J{}", tag, seq))
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
