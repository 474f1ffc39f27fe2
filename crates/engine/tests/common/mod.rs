// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for watcher integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use jw_adapters::{FakeAccounting, FakeNotifyAdapter, FakeRenderer};
use jw_core::{FakeClock, JobId, StatusRecord, MANIFEST_FILE};
use jw_engine::{PassOptions, PassReport, Watcher, WatcherDeps};
use jw_storage::LockConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestWatcher = Watcher<FakeNotifyAdapter, FakeRenderer, FakeAccounting, FakeClock>;

pub const PARTICLES: &str = "\
data_particles
loop_
_rlnImageName #1
_rlnMicrographName #2
000001@Extract/job003/a.mrcs mic_a.mrc
000002@Extract/job003/a.mrcs mic_a.mrc
000003@Extract/job003/b.mrcs mic_b.mrc
";

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

pub fn model_star(resolution: f64, occupancy: &[f64]) -> String {
    let mut text = format!(
        "data_model_general\n_rlnCurrentResolution {resolution}\n\ndata_model_classes\nloop_\n_rlnClassDistribution #1\n"
    );
    for o in occupancy {
        text.push_str(&format!("{o}\n"));
    }
    text
}

pub fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

pub fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

pub struct Fixture {
    pub state: TempDir,
    pub data: TempDir,
    pub notify: FakeNotifyAdapter,
    pub renderer: FakeRenderer,
    pub accounting: FakeAccounting,
    pub clock: FakeClock,
    pub watcher: TestWatcher,
}

impl Fixture {
    /// Watcher whose accounting source is unavailable
    pub fn new() -> Self {
        Self::with(LockConfig::default(), None)
    }

    /// Watcher whose accounting source serves `table`
    pub fn with_accounting(table: &str) -> Self {
        Self::with(LockConfig::default(), Some(table))
    }

    pub fn with(lock: LockConfig, table: Option<&str>) -> Self {
        let state = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let notify = FakeNotifyAdapter::new();
        let renderer = FakeRenderer::new();
        let accounting = match table {
            Some(table) => FakeAccounting::with_table(table),
            None => FakeAccounting::new(),
        };
        let clock = FakeClock::at(epoch());
        let watcher = Watcher::open(
            state.path(),
            lock,
            WatcherDeps {
                notify: notify.clone(),
                renderer: renderer.clone(),
                accounting: accounting.clone(),
            },
            clock.clone(),
        )
        .unwrap();
        Self {
            state,
            data,
            notify,
            renderer,
            accounting,
            clock,
            watcher,
        }
    }

    /// Create a pipeline project on disk and register it
    pub fn project(&self, name: &str, tag: Option<&str>) -> PathBuf {
        let root = self.data.path().join(name);
        fs::create_dir_all(&root).unwrap();
        touch(&root, MANIFEST_FILE);
        self.watcher.add_project(&root, Some(name), tag).unwrap();
        root.canonicalize().unwrap()
    }

    pub fn job_dir(&self, root: &Path, stage: &str, seq: u32) -> PathBuf {
        let dir = root.join(stage).join(format!("job{seq:03}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn pass(&self) -> PassReport {
        self.watcher.run_pass(&PassOptions::default()).unwrap()
    }

    pub fn record(&self, id: &str) -> Option<StatusRecord> {
        self.watcher
            .status_records()
            .unwrap()
            .into_iter()
            .find(|r| r.job == JobId::new(id))
    }

    pub fn messages(&self) -> Vec<String> {
        self.notify.sent().into_iter().map(|p| p.message).collect()
    }
}
