// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image generation from density maps via external tools

mod command;

pub use command::CommandRenderer;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRenderer, RenderCall};

use jw_core::DisplayMode;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer disabled")]
    Disabled,
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("renderer produced no output at {0}")]
    MissingOutput(PathBuf),
}

/// Turns a map or volume file into a picture.
///
/// Object safe so handlers can take `&dyn Renderer`.
pub trait Renderer: Send + Sync {
    /// Render `input` into an image file at `output`
    fn render(&self, input: &Path, output: &Path, mode: DisplayMode) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, input: &Path, output: &Path, mode: DisplayMode) -> Result<(), RenderError> {
        (**self).render(input, output, mode)
    }
}

/// Renderer used when no image tool is configured
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpRenderer;

impl NoOpRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for NoOpRenderer {
    fn render(&self, _input: &Path, _output: &Path, _mode: DisplayMode) -> Result<(), RenderError> {
        Err(RenderError::Disabled)
    }
}
