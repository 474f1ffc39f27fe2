// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler accounting sources
//!
//! Each source yields the raw accounting table as text; parsing lives in the
//! engine's evidence readers.

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAccounting;

use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountingError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of the scheduler accounting table
pub trait AccountingSource: Send + Sync {
    /// Whether this source can yield rows at all
    fn is_enabled(&self) -> bool {
        true
    }

    fn fetch(&self) -> Result<String, AccountingError>;
}

impl<A: AccountingSource + ?Sized> AccountingSource for Box<A> {
    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }

    fn fetch(&self) -> Result<String, AccountingError> {
        (**self).fetch()
    }
}

/// No scheduler accounting; pipeline jobs are resolved from the filesystem alone
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAccounting;

impl AccountingSource for NoAccounting {
    fn is_enabled(&self) -> bool {
        false
    }

    fn fetch(&self) -> Result<String, AccountingError> {
        Ok(String::new())
    }
}

/// Runs the scheduler's accounting command (`sacct`)
#[derive(Clone, Debug)]
pub struct SacctCommand {
    program: String,
    args: Vec<String>,
}

impl SacctCommand {
    /// Widened columns so job names and states are not truncated
    pub const DEFAULT_ARGS: [&'static str; 1] = ["--format=JobID%30,JobName%40,State%30,ExitCode"];

    pub fn new() -> Self {
        Self {
            program: "sacct".to_string(),
            args: Self::DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Default for SacctCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountingSource for SacctCommand {
    fn fetch(&self) -> Result<String, AccountingError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| AccountingError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AccountingError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Reads a previously captured accounting table from disk
#[derive(Clone, Debug)]
pub struct AccountingFile {
    path: PathBuf,
}

impl AccountingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountingSource for AccountingFile {
    fn fetch(&self) -> Result<String, AccountingError> {
        std::fs::read_to_string(&self.path).map_err(|source| AccountingError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "accounting_tests.rs"]
mod tests;
