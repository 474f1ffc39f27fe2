// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{
    attach_render, format_resolution, iterations, read_star, star_f64, HandlerContext,
    HandlerError,
};
use jw_core::Payload;
use std::path::Path;

const MODEL_MAP: &str = "initial_model.mrc";

pub(super) fn finished(
    dir: &Path,
    ctx: &HandlerContext<'_>,
    payload: &mut Payload,
) -> Result<(), HandlerError> {
    let (iteration, path) = iterations(dir, "_model.star")
        .pop()
        .ok_or_else(|| HandlerError::MissingArtifact(dir.join("run_itNNN_model.star")))?;
    let star = read_star(&path)?;
    let resolution = star_f64(&star, &path, "_rlnCurrentResolution")?;
    payload.push_line(format!(
        "Initial model at {} after {iteration} iterations",
        format_resolution(resolution)
    ));
    attach_render(ctx, dir, MODEL_MAP, payload);
    Ok(())
}
