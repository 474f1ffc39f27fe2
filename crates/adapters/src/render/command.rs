// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Renderer that shells out to an image conversion binary

use super::{RenderError, Renderer};
use jw_core::DisplayMode;
use std::path::Path;
use std::process::Command;

/// Runs `program` with `args`, substituting `{input}`, `{output}` and `{mode}`
#[derive(Clone, Debug)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![
                "{input}".to_string(),
                "{output}".to_string(),
                "--mode".to_string(),
                "{mode}".to_string(),
            ],
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn expand_args(&self, input: &Path, output: &Path, mode: DisplayMode) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input)
                    .replace("{output}", &output)
                    .replace("{mode}", mode.as_str())
            })
            .collect()
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, input: &Path, output: &Path, mode: DisplayMode) -> Result<(), RenderError> {
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        }

        let result = Command::new(&self.program)
            .args(self.expand_args(input, output, mode))
            .output()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        if !output.exists() {
            return Err(RenderError::MissingOutput(output.to_path_buf()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
