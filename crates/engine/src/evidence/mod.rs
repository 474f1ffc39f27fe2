// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Evidence readers: scheduler accounting rows and job directory markers
//!
//! Readers never fail on missing input. Absence is evidence too.

mod accounting;
mod markers;

pub use accounting::{parse_accounting, parse_line, scheduler_state, EvidenceReadError, SchedulerRow};
pub use markers::{Markers, ABORTED_MARKER, FAILED_MARKER, STARTED_MARKER, SUCCESS_MARKER};
