// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per job type enrichment of state transitions
//!
//! Every transition gets a headline. `Finished` transitions of pipeline jobs
//! are enriched from the job's output files; `Failed` ones carry the tail of
//! the job's error log. Handlers read job directories and ask the renderer
//! for pictures but never touch watcher state.

mod class3d;
mod ctf_refine;
mod extract;
mod initial_model;
mod multibody;
mod postprocess;
mod refine3d;

use crate::star::StarFile;
use jw_adapters::{RenderError, Renderer};
use jw_core::{
    Attachment, AttachmentKind, DisplayMode, Job, JobState, JobType, Payload, Transition,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory inside each job directory holding rendered pictures
pub const RENDER_DIR: &str = ".jobwatch";

/// Error log whose tail is attached to failure notices
pub const ERROR_LOG: &str = "run.err";

const ERROR_TAIL_LINES: usize = 10;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing artifact {}", .0.display())]
    MissingArtifact(PathBuf),
    #[error("unparsable artifact {}: {reason}", path.display())]
    Unparsable { path: PathBuf, reason: String },
}

impl HandlerError {
    pub fn unparsable(path: &Path, reason: impl Into<String>) -> Self {
        HandlerError::Unparsable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// The artifact this error is about
    pub fn artifact(&self) -> &Path {
        match self {
            HandlerError::MissingArtifact(path) => path,
            HandlerError::Unparsable { path, .. } => path,
        }
    }
}

/// What handlers may use besides the job itself
pub struct HandlerContext<'a> {
    pub renderer: &'a dyn Renderer,
    pub display: DisplayMode,
}

/// Build the payload for one transition
pub fn extract(
    job: &Job,
    transition: Transition,
    ctx: &HandlerContext<'_>,
) -> Result<Payload, HandlerError> {
    let mut payload = Payload::new(format!("{}: {}", job.label(), transition));

    let Some(dir) = job.dir.as_deref() else {
        return Ok(payload);
    };

    match transition.to {
        JobState::Finished => enrich_finished(job.job_type, dir, ctx, &mut payload)?,
        JobState::Failed => attach_error_tail(dir, &mut payload),
        JobState::Pending | JobState::Running | JobState::UserAbort => {}
    }
    Ok(payload)
}

fn enrich_finished(
    job_type: JobType,
    dir: &Path,
    ctx: &HandlerContext<'_>,
    payload: &mut Payload,
) -> Result<(), HandlerError> {
    match job_type {
        JobType::Extract => extract::finished(dir, payload),
        JobType::InitialModel => initial_model::finished(dir, ctx, payload),
        JobType::Refine3D => refine3d::finished(dir, ctx, payload),
        JobType::Class3D => class3d::finished(dir, ctx, payload),
        JobType::PostProcess => postprocess::finished(dir, ctx, payload),
        JobType::CtfRefine => ctf_refine::finished(dir, payload),
        JobType::MultiBodyRefinement => multibody::finished(dir, payload),
        JobType::Unknown => Ok(()),
    }
}

fn attach_error_tail(dir: &Path, payload: &mut Payload) {
    let path = dir.join(ERROR_LOG);
    let Ok(text) = std::fs::read_to_string(&path) else {
        tracing::debug!(path = %path.display(), "no error log to attach");
        return;
    };
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return;
    }
    payload.push_line(format!("Last lines of {ERROR_LOG}:"));
    for line in &lines[lines.len().saturating_sub(ERROR_TAIL_LINES)..] {
        payload.push_line(format!("    {line}"));
    }
}

/// Read a required STAR artifact
pub(crate) fn read_star(path: &Path) -> Result<StarFile, HandlerError> {
    StarFile::read(path).map_err(|e| {
        if e.is_not_found() {
            HandlerError::MissingArtifact(path.to_path_buf())
        } else {
            HandlerError::unparsable(path, e.to_string())
        }
    })
}

/// Required float value from a STAR file
pub(crate) fn star_f64(star: &StarFile, path: &Path, key: &str) -> Result<f64, HandlerError> {
    let raw = star
        .value(key)
        .ok_or_else(|| HandlerError::unparsable(path, format!("no {key}")))?;
    parse_f64(raw, path, key)
}

pub(crate) fn parse_f64(raw: &str, path: &Path, what: &str) -> Result<f64, HandlerError> {
    raw.parse::<f64>()
        .map_err(|_| HandlerError::unparsable(path, format!("{what} is not a number: {raw:?}")))
}

/// Number of rows in the particle table of a STAR file
pub(crate) fn particle_count(path: &Path) -> Result<usize, HandlerError> {
    let star = read_star(path)?;
    star.table_with("_rlnImageName")
        .map(|t| t.len())
        .ok_or_else(|| HandlerError::unparsable(path, "no particle table"))
}

/// Render a map into the job's picture directory and attach it.
///
/// Failure to render is never fatal; the picture is left out.
pub(crate) fn attach_render(
    ctx: &HandlerContext<'_>,
    dir: &Path,
    input_name: &str,
    payload: &mut Payload,
) {
    let input = dir.join(input_name);
    if !input.is_file() {
        tracing::warn!(input = %input.display(), "map missing, picture omitted");
        return;
    }
    let stem = Path::new(input_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| input_name.to_string());
    let output = dir
        .join(RENDER_DIR)
        .join(format!("{stem}_{}.png", ctx.display));

    if let Some(parent) = output.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(dir = %parent.display(), error = %e, "cannot create picture directory");
            return;
        }
    }

    match ctx.renderer.render(&input, &output, ctx.display) {
        Ok(()) => payload
            .attachments
            .push(Attachment::file(AttachmentKind::Image, output)),
        Err(RenderError::Disabled) => {}
        Err(e) => {
            tracing::warn!(input = %input.display(), error = %e, "render failed, picture omitted")
        }
    }
}

/// Attach a document if the job produced it
pub(crate) fn attach_document(dir: &Path, name: &str, payload: &mut Payload) {
    let path = dir.join(name);
    if path.is_file() {
        payload
            .attachments
            .push(Attachment::file(AttachmentKind::Document, path));
    } else {
        tracing::debug!(path = %path.display(), "document not present");
    }
}

/// `run_itNNN<suffix>` files in a job directory, ordered by iteration
pub(crate) fn iterations(dir: &Path, suffix: &str) -> Vec<(u32, PathBuf)> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut found: Vec<(u32, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let iteration = name
                .strip_prefix("run_it")?
                .strip_suffix(suffix)?
                .parse::<u32>()
                .ok()?;
            Some((iteration, entry.path()))
        })
        .collect();
    found.sort_by_key(|(iteration, _)| *iteration);
    found
}

pub(crate) fn format_resolution(angstrom: f64) -> String {
    format!("{angstrom:.2} Å")
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
