// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diff & dispatch: one processing pass over every watched job
//!
//! A pass runs under the state lock. For each job it resolves the current
//! state, compares it with the stored record, runs the job type's handler on
//! a change, commits the new record and hands the payload to the transport.

use crate::discovery::discover_jobs;
use crate::error::EngineError;
use crate::evidence::{parse_accounting, Markers, SchedulerRow};
use crate::handlers::{self, HandlerContext};
use crate::resolver::resolve;
use jw_adapters::{AccountingSource, NotifyAdapter, Renderer};
use jw_core::{
    Clock, DisplayMode, Job, JobId, JobState, Payload, Project, StatusRecord, Transition,
};
use jw_storage::{
    JsonStore, LockConfig, LockManager, LockRecord, Registry, StatusStore,
};
use regex::Regex;
use std::path::Path;
use std::time::Duration;

/// Per-job file holding the last committed state string
pub const STATUS_MARKER: &str = ".jobwatch_status";

/// Adapter dependencies of the watcher
pub struct WatcherDeps<N, R, A> {
    pub notify: N,
    pub renderer: R,
    pub accounting: A,
}

/// Which jobs a pass looks at and how it treats them
#[derive(Debug, Clone, Default)]
pub struct PassOptions {
    /// Restrict to these projects; empty means all
    pub projects: Vec<String>,
    /// Only pure scheduler jobs, no pipeline projects
    pub scheduler_only: bool,
    /// Reprocess jobs even when their state did not change
    pub force: bool,
    /// Run handlers and commit, but deliver nothing
    pub suppress: bool,
}

/// A job whose handler failed; its record was left untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub job: JobId,
    pub error: String,
}

/// A committed state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub job: JobId,
    pub label: String,
    pub transition: Transition,
    pub delivered: bool,
}

/// Outcome of one pass
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    pub examined: usize,
    pub committed: Vec<Committed>,
    pub failures: Vec<JobFailure>,
    pub delivery_failures: usize,
    /// Whether scheduler evidence was available this pass
    pub scheduler_evidence: bool,
}

impl PassReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn delivered(&self) -> usize {
        self.committed.iter().filter(|c| c.delivered).count()
    }
}

/// A discovered job with its current and recorded state
#[derive(Debug, Clone)]
pub struct JobView {
    pub job: Job,
    pub current: JobState,
    pub recorded: Option<StatusRecord>,
}

/// Lock diagnostics
#[derive(Debug, Clone)]
pub struct LockStatus {
    pub record: LockRecord,
    pub age: Duration,
    pub stale: bool,
}

pub struct Watcher<N, R, A, C: Clock> {
    registry: Registry,
    status: StatusStore,
    lock: LockManager<C>,
    notify: N,
    renderer: R,
    accounting: A,
    clock: C,
}

impl<N, R, A, C> Watcher<N, R, A, C>
where
    N: NotifyAdapter,
    R: Renderer,
    A: AccountingSource,
    C: Clock,
{
    /// Open the watcher state under `state_dir`, creating it if needed
    pub fn open(
        state_dir: &Path,
        lock_config: LockConfig,
        deps: WatcherDeps<N, R, A>,
        clock: C,
    ) -> Result<Self, EngineError> {
        let store = JsonStore::open(state_dir)?;
        Ok(Self {
            registry: Registry::new(store.clone()),
            status: StatusStore::new(store),
            lock: LockManager::new(state_dir, lock_config, clock.clone()),
            notify: deps.notify,
            renderer: deps.renderer,
            accounting: deps.accounting,
            clock,
        })
    }

    pub fn add_project(
        &self,
        path: &Path,
        name: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Project, EngineError> {
        let handle = self.lock.acquire()?;
        let project = self.registry.add(path, name, tag, &self.clock)?;
        handle.release()?;
        Ok(project)
    }

    /// Forget a project and its status records. Returns the number of
    /// records purged.
    pub fn remove_project(&self, name: &str) -> Result<(Project, usize), EngineError> {
        let handle = self.lock.acquire()?;
        let project = self.registry.remove(name)?;
        let purged = self.status.purge_project(&project.name)?;
        handle.release()?;
        tracing::info!(project = name, purged, "status records purged");
        Ok((project, purged))
    }

    pub fn projects(&self) -> Result<Vec<Project>, EngineError> {
        Ok(self.registry.list()?)
    }

    /// Discovered jobs of one project with current and recorded state
    pub fn project_jobs(&self, name: &str) -> Result<Vec<JobView>, EngineError> {
        let project = self.registry.get(name)?;
        let rows = self.scheduler_rows().unwrap_or_default();
        let mut views = Vec::new();
        for job in discover_jobs(&project) {
            let markers = job.dir.as_deref().map(|d| Markers::probe(d, job.job_type));
            let row = linked_row(&project, &job, &rows);
            let current = resolve(markers.as_ref(), row);
            let recorded = self.status.get(&job.id)?;
            views.push(JobView {
                job,
                current,
                recorded,
            });
        }
        views.sort_by(|a, b| a.job.id.cmp(&b.job.id));
        Ok(views)
    }

    pub fn add_pattern(&self, pattern: &str) -> Result<bool, EngineError> {
        let handle = self.lock.acquire()?;
        let added = self.registry.add_pattern(pattern)?;
        handle.release()?;
        Ok(added)
    }

    pub fn remove_pattern(&self, pattern: &str) -> Result<bool, EngineError> {
        let handle = self.lock.acquire()?;
        let removed = self.registry.remove_pattern(pattern)?;
        handle.release()?;
        Ok(removed)
    }

    pub fn patterns(&self) -> Result<Vec<String>, EngineError> {
        Ok(self.registry.patterns()?)
    }

    pub fn display_mode(&self) -> Result<DisplayMode, EngineError> {
        Ok(self.registry.preferences()?.display)
    }

    pub fn set_display_mode(&self, mode: DisplayMode) -> Result<(), EngineError> {
        let handle = self.lock.acquire()?;
        self.registry.set_display_mode(mode)?;
        handle.release()?;
        Ok(())
    }

    pub fn status_records(&self) -> Result<Vec<StatusRecord>, EngineError> {
        Ok(self.status.list_all()?)
    }

    pub fn lock_status(&self) -> Result<Option<LockStatus>, EngineError> {
        let Some(record) = self.lock.status()? else {
            return Ok(None);
        };
        let age = self.lock.age(&record);
        Ok(Some(LockStatus {
            stale: age > self.lock.config().stale_after,
            age,
            record,
        }))
    }

    /// Operator override: drop the lock record whoever holds it
    pub fn clear_lock(&self) -> Result<Option<LockRecord>, EngineError> {
        Ok(self.lock.force_clear()?)
    }

    /// Run one pass.
    ///
    /// Lock, registry and store errors abort the pass. Handler failures are
    /// isolated to their job; delivery failures are only logged.
    pub fn run_pass(&self, options: &PassOptions) -> Result<PassReport, EngineError> {
        let span = tracing::info_span!(
            "pass",
            force = options.force,
            suppress = options.suppress,
            scheduler_only = options.scheduler_only
        );
        let _enter = span.enter();

        let handle = self.lock.acquire()?;
        let report = self.process(options)?;
        handle.release()?;

        tracing::info!(
            examined = report.examined,
            committed = report.committed.len(),
            delivered = report.delivered(),
            failures = report.failures.len(),
            "pass complete"
        );
        Ok(report)
    }

    fn process(&self, options: &PassOptions) -> Result<PassReport, EngineError> {
        let mut report = PassReport::default();
        let ctx = HandlerContext {
            renderer: &self.renderer,
            display: self.registry.preferences()?.display,
        };

        let rows = self.scheduler_rows();
        report.scheduler_evidence = rows.is_some();
        let rows = rows.unwrap_or_default();

        let all_projects = self.registry.list()?;

        if !options.scheduler_only {
            let selected = if options.projects.is_empty() {
                all_projects.clone()
            } else {
                options
                    .projects
                    .iter()
                    .map(|name| self.registry.get(name))
                    .collect::<Result<Vec<_>, _>>()?
            };
            for project in &selected {
                let _span = tracing::info_span!("project", name = %project.name).entered();
                for job in discover_jobs(project) {
                    let markers = job.dir.as_deref().map(|d| Markers::probe(d, job.job_type));
                    let current = resolve(markers.as_ref(), linked_row(project, &job, &rows));
                    self.process_job(&job, current, options, &ctx, &mut report)?;
                }
            }
        }

        if self.accounting.is_enabled() && (options.scheduler_only || options.projects.is_empty())
        {
            let patterns = self.registry.compiled_patterns()?;
            for row in watched_rows(&rows, &patterns, &all_projects) {
                let job = Job::scheduler(&row.job_id, &row.name);
                let current = resolve(None, Some(row));
                self.process_job(&job, current, options, &ctx, &mut report)?;
            }
        }

        Ok(report)
    }

    fn process_job(
        &self,
        job: &Job,
        current: JobState,
        options: &PassOptions,
        ctx: &HandlerContext<'_>,
        report: &mut PassReport,
    ) -> Result<(), EngineError> {
        let _span = tracing::debug_span!("job", id = %job.id).entered();
        report.examined += 1;

        let prior = self.status.get(&job.id)?;
        let prior_state = prior.as_ref().map_or(JobState::Pending, |r| r.state);

        if !options.force {
            if current == prior_state {
                tracing::trace!(state = %current, "unchanged");
                return Ok(());
            }
            if prior_state.is_terminal() {
                tracing::debug!(recorded = %prior_state, observed = %current, "terminal state kept");
                return Ok(());
            }
        }

        let transition = Transition::new(prior_state, current);
        if !transition.is_change() {
            tracing::debug!(state = %current, "forced reprocess");
        }
        let payload = match handlers::extract(job, transition, ctx) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(
                    job = %job.id,
                    %transition,
                    artifact = %e.artifact().display(),
                    error = %e,
                    "handler failed, will retry"
                );
                report.failures.push(JobFailure {
                    job: job.id.clone(),
                    error: e.to_string(),
                });
                return Ok(());
            }
        };

        let fingerprint = payload.fingerprint();
        if prior
            .as_ref()
            .and_then(|r| r.fingerprint.as_deref())
            .is_some_and(|f| f == fingerprint)
        {
            tracing::info!(job = %job.id, "payload unchanged since last notification");
        }

        let record = StatusRecord::new(job.id.clone(), current, self.clock.now())
            .with_project(job.project.clone())
            .with_fingerprint(fingerprint);
        self.status.put(&record)?;
        if let Some(dir) = job.dir.as_deref() {
            write_status_marker(dir, current);
        }
        tracing::info!(job = %job.id, %transition, "committed");

        let delivered = !options.suppress && self.deliver(job, &payload, report);
        report.committed.push(Committed {
            job: job.id.clone(),
            label: job.label(),
            transition,
            delivered,
        });
        Ok(())
    }

    fn deliver(&self, job: &Job, payload: &Payload, report: &mut PassReport) -> bool {
        match self.notify.send(payload) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(job = %job.id, error = %e, "delivery failed, not retried");
                report.delivery_failures += 1;
                false
            }
        }
    }

    /// Parsed accounting rows, `None` when disabled or unavailable
    fn scheduler_rows(&self) -> Option<Vec<SchedulerRow>> {
        if !self.accounting.is_enabled() {
            return None;
        }
        match self.accounting.fetch() {
            Ok(text) => Some(parse_accounting(&text)),
            Err(e) => {
                tracing::warn!(error = %e, "scheduler accounting unavailable, continuing without it");
                None
            }
        }
    }
}

/// The scheduler row named after a pipeline job (`<tag>J<seq>`), latest
/// submission first
fn linked_row<'a>(project: &Project, job: &Job, rows: &'a [SchedulerRow]) -> Option<&'a SchedulerRow> {
    let name = project.scheduler_name(job.seq?)?;
    rows.iter().rev().find(|r| !r.is_step() && r.name == name)
}

/// Parent rows watched as pure scheduler jobs: matching a pattern (or any
/// row without patterns) and not linked to a pipeline project
fn watched_rows<'a>(
    rows: &'a [SchedulerRow],
    patterns: &[Regex],
    projects: &[Project],
) -> Vec<&'a SchedulerRow> {
    rows.iter()
        .filter(|r| !r.is_step())
        .filter(|r| patterns.is_empty() || patterns.iter().any(|p| p.is_match(&r.name)))
        .filter(|r| !projects.iter().any(|p| is_linked_name(p, &r.name)))
        .collect()
}

fn is_linked_name(project: &Project, name: &str) -> bool {
    let Some(tag) = project.tag.as_deref() else {
        return false;
    };
    name.strip_prefix(tag)
        .and_then(|rest| rest.strip_prefix('J'))
        .is_some_and(|seq| !seq.is_empty() && seq.bytes().all(|b| b.is_ascii_digit()))
}

fn write_status_marker(dir: &Path, state: JobState) {
    let path = dir.join(STATUS_MARKER);
    if let Err(e) = std::fs::write(&path, format!("{state}\n")) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write status marker");
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
