// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State resolution from filesystem and scheduler evidence

use crate::evidence::{Markers, SchedulerRow};
use jw_core::JobState;

/// State implied by directory markers, `None` when no marker is present.
///
/// Priority: failed, aborted, finished, started.
pub fn markers_state(markers: &Markers) -> Option<JobState> {
    if markers.failed {
        Some(JobState::Failed)
    } else if markers.aborted {
        Some(JobState::UserAbort)
    } else if markers.finished {
        Some(JobState::Finished)
    } else if markers.started {
        Some(JobState::Running)
    } else {
        None
    }
}

/// Resolve a job's current state.
///
/// `markers` is `None` for pure scheduler jobs. Informative markers always
/// win; otherwise the linked scheduler row decides, else `Pending`.
pub fn resolve(markers: Option<&Markers>, row: Option<&SchedulerRow>) -> JobState {
    markers
        .and_then(markers_state)
        .or_else(|| row.and_then(SchedulerRow::job_state))
        .unwrap_or(JobState::Pending)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
