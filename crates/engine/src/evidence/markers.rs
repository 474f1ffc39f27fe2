// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job directory marker probe

use jw_core::JobType;
use std::path::Path;

/// Written when the job starts producing output
pub const STARTED_MARKER: &str = "run.out";
pub const FAILED_MARKER: &str = "RELION_JOB_EXIT_FAILURE";
pub const ABORTED_MARKER: &str = "RELION_JOB_EXIT_ABORTED";
pub const SUCCESS_MARKER: &str = "RELION_JOB_EXIT_SUCCESS";

/// Which markers exist in a job directory at probe time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markers {
    pub started: bool,
    pub failed: bool,
    pub aborted: bool,
    pub finished: bool,
}

impl Markers {
    /// Probe a job directory. A missing directory yields no markers.
    pub fn probe(dir: &Path, job_type: JobType) -> Self {
        let finished = dir.join(SUCCESS_MARKER).is_file()
            || job_type
                .terminal_outputs()
                .iter()
                .any(|name| dir.join(name).is_file());

        Self {
            started: dir.join(STARTED_MARKER).is_file(),
            failed: dir.join(FAILED_MARKER).is_file(),
            aborted: dir.join(ABORTED_MARKER).is_file(),
            finished,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.started || self.failed || self.aborted || self.finished)
    }
}

#[cfg(test)]
#[path = "markers_tests.rs"]
mod tests;
