// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler accounting table reader
//!
//! Expects `sacct`-style output: `JobID JobName State ExitCode`, optionally
//! preceded by a header and a dashed separator line. Column widths vary with
//! the caller's `--format`, so rows are split on whitespace. Job names may
//! contain spaces; the state is the rightmost state word before the exit
//! code. The state may span several tokens (`CANCELLED by 1000`) or be
//! truncated (`CANCELLED+`).

use jw_core::JobState;
use thiserror::Error;

/// A malformed accounting line. Skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvidenceReadError {
    #[error("line {line}: expected at least 4 fields, found {found}")]
    TooShort { line: usize, found: usize },
    #[error("line {line}: unparsable exit code {value:?}")]
    BadExitCode { line: usize, value: String },
}

/// One accounting row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerRow {
    pub job_id: String,
    /// Set for job steps (`<parent>.<step>` or `<parent>_<n>`)
    pub parent_id: Option<String>,
    pub name: String,
    /// State string as reported, possibly truncated
    pub state: String,
    pub exit_code: i32,
}

impl SchedulerRow {
    pub fn is_step(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Canonical state, `None` for states the watcher does not know
    pub fn job_state(&self) -> Option<JobState> {
        scheduler_state(&self.state)
    }
}

/// Parse a whole accounting table, skipping headers and malformed lines
pub fn parse_accounting(text: &str) -> Vec<SchedulerRow> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if is_header(line) {
            continue;
        }
        match parse_line(index + 1, line) {
            Ok(row) => rows.push(row),
            Err(e) => tracing::debug!(error = %e, "skipping accounting line"),
        }
    }
    rows
}

/// Parse a single data line
pub fn parse_line(line_no: usize, line: &str) -> Result<SchedulerRow, EvidenceReadError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(EvidenceReadError::TooShort {
            line: line_no,
            found: fields.len(),
        });
    }

    let last = fields[fields.len() - 1];
    let exit_code = last
        .split(':')
        .next()
        .and_then(|code| code.parse::<i32>().ok())
        .ok_or_else(|| EvidenceReadError::BadExitCode {
            line: line_no,
            value: last.to_string(),
        })?;

    let job_id = fields[0].to_string();
    let parent_id = job_id
        .split_once(['.', '_'])
        .map(|(parent, _)| parent.to_string());

    let middle = &fields[1..fields.len() - 1];
    // Unknown states keep the single-token name layout
    let split = (1..middle.len())
        .rev()
        .find(|&i| is_state_token(middle[i]))
        .unwrap_or(1);

    Ok(SchedulerRow {
        job_id,
        parent_id,
        name: middle[..split].join(" "),
        state: middle[split..].join(" "),
        exit_code,
    })
}

/// A token that can start the state column: an exact state name, or a
/// truncated (`+`-suffixed) prefix of one
fn is_state_token(token: &str) -> bool {
    if token.ends_with('+') {
        return scheduler_state(token).is_some();
    }
    let upper = token.to_ascii_uppercase();
    STATE_TABLE.iter().any(|(name, _)| *name == upper)
}

fn is_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty()
        || trimmed.starts_with("JobID")
        || trimmed.chars().all(|c| c == '-' || c.is_whitespace())
}

const STATE_TABLE: &[(&str, JobState)] = &[
    ("PENDING", JobState::Pending),
    ("REQUEUED", JobState::Pending),
    ("RESIZING", JobState::Pending),
    ("RUNNING", JobState::Running),
    ("CONFIGURING", JobState::Running),
    ("COMPLETING", JobState::Running),
    ("SUSPENDED", JobState::Running),
    ("STOPPED", JobState::Running),
    ("COMPLETED", JobState::Finished),
    ("CANCELLED", JobState::UserAbort),
    ("FAILED", JobState::Failed),
    ("TIMEOUT", JobState::Failed),
    ("NODE_FAIL", JobState::Failed),
    ("OUT_OF_MEMORY", JobState::Failed),
    ("BOOT_FAIL", JobState::Failed),
    ("DEADLINE", JobState::Failed),
    ("PREEMPTED", JobState::Failed),
];

/// Map a scheduler state string onto the watcher's states.
///
/// Truncated strings resolve when their prefix is unambiguous.
pub fn scheduler_state(raw: &str) -> Option<JobState> {
    let word = raw.split_whitespace().next()?;
    let stem = word.trim_end_matches('+').to_ascii_uppercase();
    if stem.is_empty() {
        return None;
    }

    if let Some((_, state)) = STATE_TABLE.iter().find(|(name, _)| *name == stem) {
        return Some(*state);
    }

    let mut candidates = STATE_TABLE
        .iter()
        .filter(|(name, _)| name.starts_with(stem.as_str()));
    match (candidates.next(), candidates.next()) {
        (Some((_, state)), None) => Some(*state),
        _ => None,
    }
}

#[cfg(test)]
#[path = "accounting_tests.rs"]
mod tests;
