// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline job discovery by directory enumeration

use jw_core::{Job, Project};
use std::fs::ReadDir;

/// Lazily enumerate the jobs of a project.
///
/// Walks one directory level per stage (`<root>/<Stage>/jobNNN`). Every
/// visible directory under the root is a candidate stage; stages without
/// dedicated enrichment yield `JobType::Unknown` jobs. Unrecognized entries
/// are skipped. Calling again starts a fresh walk.
pub fn discover_jobs(project: &Project) -> Discovery<'_> {
    let stages = match std::fs::read_dir(&project.root) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!(root = %project.root.display(), error = %e, "project root unreadable");
            None
        }
    };
    Discovery {
        project,
        stages,
        current: None,
    }
}

pub struct Discovery<'a> {
    project: &'a Project,
    stages: Option<ReadDir>,
    current: Option<(String, ReadDir)>,
}

impl Discovery<'_> {
    fn next_stage(&mut self) -> Option<(String, ReadDir)> {
        let stages = self.stages.as_mut()?;
        for entry in stages.by_ref().filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match std::fs::read_dir(&path) {
                Ok(entries) => return Some((name, entries)),
                Err(e) => tracing::debug!(dir = %path.display(), error = %e, "stage unreadable"),
            }
        }
        self.stages = None;
        None
    }
}

impl Iterator for Discovery<'_> {
    type Item = Job;

    fn next(&mut self) -> Option<Job> {
        loop {
            if let Some((stage, entries)) = self.current.as_mut() {
                for entry in entries.by_ref().filter_map(Result::ok) {
                    let path = entry.path();
                    if !path.is_dir() {
                        continue;
                    }
                    let name = entry.file_name();
                    if let Some(seq) = parse_job_dir(&name.to_string_lossy()) {
                        return Some(Job::pipeline(&self.project.name, stage, seq, path));
                    }
                }
                self.current = None;
            }

            self.current = Some(self.next_stage()?);
        }
    }
}

/// `job012` -> 12
pub fn parse_job_dir(name: &str) -> Option<u32> {
    let digits = name.strip_prefix("job")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
