// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::JobType;
use chrono::Utc;
use jw_core::JobId;
use std::fs;
use tempfile::tempdir;
use yare::parameterized;

fn project(root: &std::path::Path) -> Project {
    Project::new("apo", root.to_path_buf(), Utc::now())
}

#[test]
fn finds_job_directories_across_stages() {
    let tmp = tempdir().unwrap();
    for dir in ["Extract/job003", "Class3D/job012", "Class3D/job013", "PostProcess/job020"] {
        fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }

    let project = project(tmp.path());
    let mut ids: Vec<JobId> = discover_jobs(&project).map(|j| j.id).collect();
    ids.sort();
    assert_eq!(
        ids,
        vec![
            JobId::new("apo/Class3D/job012"),
            JobId::new("apo/Class3D/job013"),
            JobId::new("apo/Extract/job003"),
            JobId::new("apo/PostProcess/job020"),
        ]
    );
}

#[test]
fn unrecognized_entries_are_skipped() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("Extract/job001")).unwrap();
    fs::create_dir_all(tmp.path().join("Extract/notes")).unwrap();
    fs::create_dir_all(tmp.path().join(".Nodes/job009")).unwrap();
    fs::write(tmp.path().join("Extract/job002"), b"file, not dir").unwrap();
    fs::write(tmp.path().join("default_pipeline.star"), b"").unwrap();

    let project = project(tmp.path());
    let jobs: Vec<Job> = discover_jobs(&project).collect();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job_type, JobType::Extract);
    assert_eq!(jobs[0].seq, Some(1));
    assert_eq!(jobs[0].dir.as_deref(), Some(tmp.path().join("Extract/job001").as_path()));
}

#[test]
fn stages_without_enrichment_are_generic_jobs() {
    let tmp = tempdir().unwrap();
    for dir in ["Import/job001", "MotionCorr/job002", "Class2D/job008"] {
        fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }

    let project = project(tmp.path());
    let mut jobs: Vec<Job> = discover_jobs(&project).collect();
    jobs.sort_by(|a, b| a.id.cmp(&b.id));
    let ids: Vec<&str> = jobs.iter().map(|j| j.id.0.as_str()).collect();
    assert_eq!(ids, ["apo/Class2D/job008", "apo/Import/job001", "apo/MotionCorr/job002"]);
    assert!(jobs.iter().all(|j| j.job_type == JobType::Unknown && j.dir.is_some()));
    assert_eq!(jobs[0].stage.as_deref(), Some("Class2D"));
}

#[test]
fn missing_project_root_yields_nothing() {
    let tmp = tempdir().unwrap();
    let project = project(&tmp.path().join("gone"));
    assert_eq!(discover_jobs(&project).count(), 0);
}

#[test]
fn multibody_stage_uses_short_directory_name() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("MultiBody/job030")).unwrap();
    let project = project(tmp.path());
    let jobs: Vec<Job> = discover_jobs(&project).collect();
    assert_eq!(jobs[0].job_type, JobType::MultiBodyRefinement);
}

#[test]
fn discovery_is_restartable_and_sees_new_jobs() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("Refine3D/job001")).unwrap();
    let project = project(tmp.path());
    assert_eq!(discover_jobs(&project).count(), 1);

    fs::create_dir_all(tmp.path().join("Refine3D/job002")).unwrap();
    assert_eq!(discover_jobs(&project).count(), 2);
}

#[test]
fn empty_project_yields_nothing() {
    let tmp = tempdir().unwrap();
    assert_eq!(discover_jobs(&project(tmp.path())).count(), 0);
}

#[parameterized(
    plain = { "job012", Some(12) },
    leading_zeros = { "job000", Some(0) },
    wide = { "job1234", Some(1234) },
    no_digits = { "job", None },
    suffix = { "job012a", None },
    other = { "run012", None },
    signed = { "job+12", None },
)]
fn job_dir_names(name: &str, expected: Option<u32>) {
    assert_eq!(parse_job_dir(name), expected);
}
