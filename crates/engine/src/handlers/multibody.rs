// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-body refinement: principal motion summary from the flexibility analysis

use super::{attach_document, parse_f64, HandlerError};
use jw_core::Payload;
use std::path::Path;

const EIGENVALUES: &str = "analyse_eigenvalues.dat";
const SUMMARY_COMPONENTS: usize = 3;

pub(super) fn finished(dir: &Path, payload: &mut Payload) -> Result<(), HandlerError> {
    let path = dir.join(EIGENVALUES);
    let text = std::fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HandlerError::MissingArtifact(path.clone())
        } else {
            HandlerError::unparsable(&path, e.to_string())
        }
    })?;

    // One eigenvalue per line, optionally preceded by its index
    let mut eigenvalues = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(last) = line.split_whitespace().last() {
            eigenvalues.push(parse_f64(last, &path, "eigenvalue")?);
        }
    }

    let total: f64 = eigenvalues.iter().sum();
    if eigenvalues.is_empty() || total <= 0.0 {
        return Err(HandlerError::unparsable(&path, "no positive eigenvalues"));
    }

    let summary: Vec<String> = eigenvalues
        .iter()
        .take(SUMMARY_COMPONENTS)
        .enumerate()
        .map(|(i, v)| format!("{}: {:.1}%", i + 1, v / total * 100.0))
        .collect();
    payload.push_line(format!(
        "Variance explained by principal motions ({} components): {}",
        eigenvalues.len(),
        summary.join(", ")
    ));

    attach_document(dir, "analyse_logfile.pdf", payload);
    Ok(())
}
