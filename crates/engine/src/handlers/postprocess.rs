// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{
    attach_document, attach_render, format_resolution, read_star, star_f64, HandlerContext,
    HandlerError,
};
use crate::star::StarFile;
use jw_core::{Attachment, AttachmentKind, Payload};
use std::path::Path;

/// Block holding the per-shell FSC table
const FSC_BLOCK: &str = "fsc";
const RESOLUTION: &str = "_rlnResolution";
const FSC: &str = "_rlnFourierShellCorrelationCorrected";

pub(super) fn finished(
    dir: &Path,
    ctx: &HandlerContext<'_>,
    payload: &mut Payload,
) -> Result<(), HandlerError> {
    let path = dir.join("postprocess.star");
    let star = read_star(&path)?;
    let resolution = star_f64(&star, &path, "_rlnFinalResolution")?;
    payload.push_line(format!("Final resolution: {}", format_resolution(resolution)));

    match fsc_curve(&star) {
        Some(csv) => payload.attachments.push(Attachment::bytes(
            AttachmentKind::Curve,
            "fsc.csv",
            csv.into_bytes(),
        )),
        None => tracing::debug!(path = %path.display(), "no FSC table"),
    }

    attach_render(ctx, dir, "postprocess_masked.mrc", payload);
    attach_document(dir, "logfile.pdf", payload);
    Ok(())
}

/// `resolution,fsc` rows, one per shell
fn fsc_curve(star: &StarFile) -> Option<String> {
    let table = star.block(FSC_BLOCK)?.table_with(FSC)?;
    let resolution = table.column(RESOLUTION)?;
    let fsc = table.column(FSC)?;

    let mut csv = String::from("resolution,fsc\n");
    for (r, f) in resolution.iter().zip(fsc.iter()) {
        csv.push_str(&format!("{r},{f}\n"));
    }
    Some(csv)
}
