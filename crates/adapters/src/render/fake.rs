// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake renderer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RenderError, Renderer};
use jw_core::DisplayMode;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded render request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: DisplayMode,
}

/// Writes a placeholder image for every request and records it
#[derive(Clone, Default)]
pub struct FakeRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
    failing: Arc<Mutex<bool>>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(|e| e.into_inner()) = failing;
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Renderer for FakeRenderer {
    fn render(&self, input: &Path, output: &Path, mode: DisplayMode) -> Result<(), RenderError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RenderCall {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
                mode,
            });
        if *self.failing.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(RenderError::Failed {
                program: "fake".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "fake renderer failure".to_string(),
            });
        }
        if let Some(parent) = output.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        std::fs::write(output, b"PNG").map_err(|source| RenderError::Spawn {
            program: "fake".to_string(),
            source,
        })
    }
}
