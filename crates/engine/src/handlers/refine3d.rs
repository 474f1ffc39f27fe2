// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{attach_render, format_resolution, read_star, star_f64, HandlerContext, HandlerError};
use jw_core::Payload;
use std::path::Path;

/// Written once the refinement has converged
const FINAL_MODEL: &str = "run_model.star";
const FINAL_MAP: &str = "run_class001.mrc";

pub(super) fn finished(
    dir: &Path,
    ctx: &HandlerContext<'_>,
    payload: &mut Payload,
) -> Result<(), HandlerError> {
    let path = dir.join(FINAL_MODEL);
    let star = read_star(&path)?;
    let resolution = star_f64(&star, &path, "_rlnCurrentResolution")?;
    payload.push_line(format!("Final resolution: {}", format_resolution(resolution)));
    attach_render(ctx, dir, FINAL_MAP, payload);
    Ok(())
}
