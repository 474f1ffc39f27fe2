// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs, job types and the job state lattice

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Observed state of a job.
///
/// The canonical lifecycle is `Pending -> Running -> {Finished | Failed | UserAbort}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    Pending,
    Running,
    UserAbort,
    Failed,
    Finished,
}

impl JobState {
    /// Terminal states expect no further transition
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::UserAbort)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::UserAbort => "UserAbort",
            Self::Failed => "Failed",
            Self::Finished => "Finished",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change between two observed states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: JobState,
    pub to: JobState,
}

impl Transition {
    pub fn new(from: JobState, to: JobState) -> Self {
        Self { from, to }
    }

    /// A forced reprocess reports the same state on both sides
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Error)]
#[error("unknown job type: {0}")]
pub struct ParseJobTypeError(pub String);

/// Pipeline job types with dedicated enrichment, plus `Unknown` for every
/// other stage and for generic scheduler jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Extract,
    InitialModel,
    Refine3D,
    Class3D,
    PostProcess,
    CtfRefine,
    MultiBodyRefinement,
    Unknown,
}

impl JobType {
    /// Stages with dedicated enrichment
    pub const PIPELINE: [JobType; 7] = [
        JobType::Extract,
        JobType::InitialModel,
        JobType::Refine3D,
        JobType::Class3D,
        JobType::PostProcess,
        JobType::CtfRefine,
        JobType::MultiBodyRefinement,
    ];

    /// Job type of a stage directory, `Unknown` when the stage has no
    /// dedicated enrichment
    pub fn from_stage(stage: &str) -> Self {
        stage.parse().unwrap_or(JobType::Unknown)
    }

    /// Name of the stage directory under a project root
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Extract => "Extract",
            Self::InitialModel => "InitialModel",
            Self::Refine3D => "Refine3D",
            Self::Class3D => "Class3D",
            Self::PostProcess => "PostProcess",
            Self::CtfRefine => "CtfRefine",
            Self::MultiBodyRefinement => "MultiBody",
            Self::Unknown => "Unknown",
        }
    }

    /// Output files whose presence marks the job as complete
    pub fn terminal_outputs(self) -> &'static [&'static str] {
        match self {
            Self::Extract => &["particles.star"],
            Self::InitialModel => &["initial_model.mrc"],
            Self::Refine3D => &["run_class001.mrc"],
            Self::Class3D => &[],
            Self::PostProcess => &["postprocess.star"],
            Self::CtfRefine => &["particles_ctf_refine.star"],
            Self::MultiBodyRefinement => &["analyse_logfile.pdf"],
            Self::Unknown => &[],
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for JobType {
    type Err = ParseJobTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::PIPELINE
            .into_iter()
            .find(|t| t.dir_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseJobTypeError(s.to_string()))
    }
}

/// Stable job identifier.
///
/// Pipeline jobs are `<project>/<stage>/jobNNN`; scheduler jobs are `sched/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn pipeline(project: &str, stage: &str, seq: u32) -> Self {
        Self(format!("{}/{}/job{:03}", project, stage, seq))
    }

    pub fn scheduler(scheduler_id: &str) -> Self {
        Self(format!("sched/{}", scheduler_id))
    }

    /// Flat key usable as a file name
    pub fn storage_key(&self) -> String {
        self.0
            .chars()
            .map(|c| match c {
                '/' => '~',
                c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => c,
                _ => '_',
            })
            .collect()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A unit of work discovered for one processing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub job_type: JobType,
    /// Owning project, `None` for pure scheduler jobs
    pub project: Option<String>,
    /// Stage directory name (pipeline jobs only)
    pub stage: Option<String>,
    /// Working directory, `None` when the job has no filesystem concept
    pub dir: Option<PathBuf>,
    /// Sequence number within the stage (pipeline jobs only)
    pub seq: Option<u32>,
    /// Scheduler job name (pure scheduler jobs only)
    pub name: Option<String>,
}

impl Job {
    /// A `<stage>/jobNNN` directory of a project
    pub fn pipeline(project: &str, stage: &str, seq: u32, dir: PathBuf) -> Self {
        Self {
            id: JobId::pipeline(project, stage, seq),
            job_type: JobType::from_stage(stage),
            project: Some(project.to_string()),
            stage: Some(stage.to_string()),
            dir: Some(dir),
            seq: Some(seq),
            name: None,
        }
    }

    pub fn scheduler(scheduler_id: &str, name: &str) -> Self {
        Self {
            id: JobId::scheduler(scheduler_id),
            job_type: JobType::Unknown,
            project: None,
            stage: None,
            dir: None,
            seq: None,
            name: Some(name.to_string()),
        }
    }

    /// Short human label used in notifications
    pub fn label(&self) -> String {
        match (&self.project, &self.stage, self.seq, &self.name) {
            (Some(project), Some(stage), Some(seq), _) => {
                format!("[{}] {}/job{:03}", project, stage, seq)
            }
            (_, _, _, Some(name)) => format!("{} ({})", name, self.id),
            _ => self.id.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
