// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn added() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

#[test]
fn untagged_project_has_no_scheduler_name() {
    let project = Project::new("apoferritin", "/data/apoferritin", added());
    assert_eq!(project.scheduler_name(3), None);
}

#[test]
fn tagged_project_links_sequence_numbers() {
    let project = Project::new("apoferritin", "/data/apoferritin", added()).with_tag("P1");
    assert_eq!(project.scheduler_name(3).as_deref(), Some("P1J3"));
    assert_eq!(project.scheduler_name(120).as_deref(), Some("P1J120"));
}

#[test]
fn missing_tag_defaults_when_deserialized() {
    let json = r#"{"name":"a","root":"/data/a","added_at":"2026-03-01T09:00:00Z"}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert_eq!(project.tag, None);
}

#[test]
fn directory_without_manifest_is_not_a_pipeline_root() {
    assert!(!Project::is_pipeline_root(Path::new("/nonexistent/jobwatch/root")));
}
