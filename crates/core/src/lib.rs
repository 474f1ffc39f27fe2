// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-core: domain types for the jobwatch (jw) cluster job watcher
//!
//! This crate provides:
//! - The job state lattice and job type enumeration
//! - Project, job and status record shapes shared by storage and engine
//! - Notification payloads with content fingerprints
//! - A clock abstraction for testable timestamps

pub mod clock;
pub mod job;
pub mod payload;
pub mod project;
pub mod status;

pub use clock::{Clock, FakeClock, SystemClock};
pub use job::{Job, JobId, JobState, JobType, Transition};
pub use payload::{Attachment, AttachmentKind, AttachmentSource, DisplayMode, Payload};
pub use project::{Project, MANIFEST_FILE};
pub use status::StatusRecord;
