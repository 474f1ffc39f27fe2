// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! 3D classification: class occupancy over iterations and the final class maps

use super::{attach_render, iterations, parse_f64, read_star, HandlerContext, HandlerError};
use jw_core::{Attachment, AttachmentKind, Payload};
use std::path::Path;

const DISTRIBUTION: &str = "_rlnClassDistribution";

pub(super) fn finished(
    dir: &Path,
    ctx: &HandlerContext<'_>,
    payload: &mut Payload,
) -> Result<(), HandlerError> {
    let models = iterations(dir, "_model.star");
    if models.is_empty() {
        return Err(HandlerError::MissingArtifact(
            dir.join("run_itNNN_model.star"),
        ));
    }

    let mut series = Vec::with_capacity(models.len());
    for (iteration, path) in &models {
        let star = read_star(path)?;
        let column = star
            .table_with(DISTRIBUTION)
            .and_then(|t| t.column(DISTRIBUTION))
            .ok_or_else(|| HandlerError::unparsable(path, format!("no {DISTRIBUTION}")))?;
        let occupancy = column
            .iter()
            .map(|raw| parse_f64(raw, path, DISTRIBUTION))
            .collect::<Result<Vec<_>, _>>()?;
        series.push((*iteration, occupancy));
    }

    let Some((last_iteration, last)) = series.last() else {
        return Ok(());
    };
    let summary: Vec<String> = last
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}: {:.1}%", i + 1, f * 100.0))
        .collect();
    payload.push_line(format!(
        "Class occupancy after iteration {last_iteration}: {}",
        summary.join(", ")
    ));

    payload.attachments.push(Attachment::bytes(
        AttachmentKind::Curve,
        "class_distribution.csv",
        occupancy_csv(&series).into_bytes(),
    ));

    for class in 1..=last.len() {
        let map = format!("run_it{last_iteration:03}_class{class:03}.mrc");
        attach_render(ctx, dir, &map, payload);
    }
    Ok(())
}

/// One row per iteration, one column per class
fn occupancy_csv(series: &[(u32, Vec<f64>)]) -> String {
    let classes = series.iter().map(|(_, o)| o.len()).max().unwrap_or(0);
    let mut csv = String::from("iteration");
    for class in 1..=classes {
        csv.push_str(&format!(",class{class:03}"));
    }
    csv.push('\n');
    for (iteration, occupancy) in series {
        csv.push_str(&iteration.to_string());
        for value in occupancy {
            csv.push_str(&format!(",{value}"));
        }
        csv.push('\n');
    }
    csv
}
