// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Env {
    pub state: TempDir,
    pub data: TempDir,
}

impl Env {
    pub fn new() -> Self {
        Self {
            state: TempDir::new().expect("Failed to create state directory"),
            data: TempDir::new().expect("Failed to create data directory"),
        }
    }

    /// `jw` bound to this environment's state directory
    pub fn jw(&self) -> Command {
        let mut cmd = Command::cargo_bin("jw").expect("jw binary should be built");
        cmd.arg("--state-dir")
            .arg(self.state.path())
            .env_remove("JW_STATE_DIR")
            .env_remove("RUST_LOG");
        cmd
    }

    /// A pipeline project directory with its manifest
    pub fn pipeline(&self, name: &str) -> PathBuf {
        let root = self.data.path().join(name);
        fs::create_dir_all(&root).expect("Failed to create project");
        fs::write(root.join("default_pipeline.star"), "data_pipeline_general\n")
            .expect("Failed to write manifest");
        root
    }

    pub fn job(&self, root: &Path, stage: &str, seq: u32, markers: &[&str]) -> PathBuf {
        let dir = root.join(stage).join(format!("job{seq:03}"));
        fs::create_dir_all(&dir).expect("Failed to create job directory");
        for marker in markers {
            fs::write(dir.join(marker), "").expect("Failed to write marker");
        }
        dir
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.state.path().join("config.toml"), content).expect("Failed to write config");
    }

    /// Recorded states as (job, state) pairs
    pub fn states(&self) -> Vec<(String, String)> {
        let output = self
            .jw()
            .args(["status", "--format", "json"])
            .output()
            .expect("Failed to run jw status");
        let records: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("status output should be JSON");
        records
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .map(|r| {
                        (
                            r["job"].as_str().unwrap_or_default().to_string(),
                            r["state"].as_str().unwrap_or_default().to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
