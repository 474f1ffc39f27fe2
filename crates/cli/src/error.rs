// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use chrono::{DateTime, Utc};
use jw_engine::EngineError;
use jw_storage::{LockError, RegistryError};
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct JwError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl JwError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Friendly rendering of the engine errors an operator can act on
    pub fn from_engine(err: &EngineError) -> Option<Self> {
        match err {
            EngineError::Lock(LockError::Held {
                holder,
                pid,
                since,
                stale,
            }) => Some(Self::lock_held(holder, *pid, *since, *stale)),
            EngineError::Registry(RegistryError::UnknownProject(name)) => {
                Some(Self::unknown_project(name))
            }
            EngineError::Registry(RegistryError::NotAPipelineRoot(path)) => {
                Some(Self::not_a_pipeline_root(path))
            }
            _ => None,
        }
    }

    /// Another pass holds the state lock
    pub fn lock_held(holder: &str, pid: u32, since: DateTime<Utc>, stale: bool) -> Self {
        let mut err = JwError::new("another jw pass is running")
            .with_context(format!("lock held by {holder} (pid {pid}) since {since}"));
        if stale {
            err = err
                .with_context("the lock is stale; its holder probably crashed")
                .with_suggestion("Clear it with: jw lock clear");
        } else {
            err = err
                .with_suggestion("Wait for the running pass to finish")
                .with_suggestion("Inspect the holder with: jw lock status");
        }
        err
    }

    pub fn unknown_project(name: &str) -> Self {
        JwError::new(format!("unknown project '{name}'"))
            .with_suggestion("List registered projects: jw project list")
    }

    pub fn not_a_pipeline_root(path: &Path) -> Self {
        JwError::new(format!("{} is not a pipeline project", path.display()))
            .with_context(format!(
                "no {} found in that directory",
                jw_core::MANIFEST_FILE
            ))
            .with_suggestion("Point at the directory the pipeline was started in")
    }
}

impl fmt::Display for JwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for JwError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
