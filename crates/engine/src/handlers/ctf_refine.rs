// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{attach_document, particle_count, HandlerError};
use jw_core::Payload;
use std::path::Path;

pub(super) fn finished(dir: &Path, payload: &mut Payload) -> Result<(), HandlerError> {
    let count = particle_count(&dir.join("particles_ctf_refine.star"))?;
    payload.push_line(format!("Refined CTF parameters for {count} particles"));
    attach_document(dir, "logfile.pdf", payload);
    Ok(())
}
