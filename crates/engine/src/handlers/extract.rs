// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{particle_count, HandlerError};
use jw_core::Payload;
use std::path::Path;

pub(super) fn finished(dir: &Path, payload: &mut Payload) -> Result<(), HandlerError> {
    let count = particle_count(&dir.join("particles.star"))?;
    payload.push_line(format!("Extracted {count} particles"));
    Ok(())
}
