// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use std::path::PathBuf;
use yare::parameterized;

fn row(id: &str, name: &str, state: &str) -> SchedulerRow {
    SchedulerRow {
        job_id: id.to_string(),
        parent_id: id.split_once(['.', '_']).map(|(p, _)| p.to_string()),
        name: name.to_string(),
        state: state.to_string(),
        exit_code: 0,
    }
}

fn tagged(tag: &str) -> Project {
    Project::new("apo", "/data/apo", Utc::now()).with_tag(tag)
}

#[parameterized(
    exact = { "P1", "P1J3", true },
    wide_seq = { "P1", "P1J120", true },
    other_tag = { "P1", "P2J3", false },
    no_seq = { "P1", "P1J", false },
    suffix = { "P1", "P1J3x", false },
    lowercase = { "P1", "P1j3", false },
)]
fn linked_names(tag: &str, name: &str, expected: bool) {
    assert_eq!(is_linked_name(&tagged(tag), name), expected);
}

#[test]
fn untagged_project_links_nothing() {
    let project = Project::new("apo", "/data/apo", Utc::now());
    assert!(!is_linked_name(&project, "P1J3"));
}

#[test]
fn linked_row_prefers_latest_parent_row() {
    let project = tagged("P1");
    let job = Job::pipeline("apo", "Class3D", 3, PathBuf::from("/data/apo/Class3D/job003"));
    let rows = vec![
        row("100", "P1J3", "FAILED"),
        row("101", "P1J3", "RUNNING"),
        row("101.batch", "P1J3", "COMPLETED"),
        row("102", "P1J4", "RUNNING"),
    ];
    let found = linked_row(&project, &job, &rows).unwrap();
    assert_eq!(found.job_id, "101");
}

#[test]
fn watched_rows_skip_steps_and_linked_rows() {
    let rows = vec![
        row("100", "P1J3", "RUNNING"),
        row("200", "relion_refine", "RUNNING"),
        row("200.0", "relion_refine", "RUNNING"),
        row("300", "motioncor", "PENDING"),
    ];
    let projects = vec![tagged("P1")];

    let all: Vec<&str> = watched_rows(&rows, &[], &projects)
        .iter()
        .map(|r| r.job_id.as_str())
        .collect();
    assert_eq!(all, vec!["200", "300"]);

    let patterns = vec![Regex::new("^relion_").unwrap()];
    let matched: Vec<&str> = watched_rows(&rows, &patterns, &projects)
        .iter()
        .map(|r| r.job_id.as_str())
        .collect();
    assert_eq!(matched, vec!["200"]);
}

#[test]
fn status_marker_holds_state_string() {
    let tmp = tempfile::tempdir().unwrap();
    write_status_marker(tmp.path(), JobState::UserAbort);
    let text = std::fs::read_to_string(tmp.path().join(STATUS_MARKER)).unwrap();
    assert_eq!(text, "UserAbort\n");
}

#[test]
fn report_counts_deliveries() {
    let mut report = PassReport::default();
    assert!(!report.has_failures());
    for delivered in [true, false, true] {
        report.committed.push(Committed {
            job: JobId::new("x"),
            label: "x".into(),
            transition: Transition::new(JobState::Pending, JobState::Running),
            delivered,
        });
    }
    assert_eq!(report.delivered(), 2);
    report.failures.push(JobFailure {
        job: JobId::new("y"),
        error: "boom".into(),
    });
    assert!(report.has_failures());
}
