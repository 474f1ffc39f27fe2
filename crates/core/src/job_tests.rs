// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    pending = { JobState::Pending, false },
    running = { JobState::Running, false },
    user_abort = { JobState::UserAbort, true },
    failed = { JobState::Failed, true },
    finished = { JobState::Finished, true },
)]
fn terminal_states(state: JobState, terminal: bool) {
    assert_eq!(state.is_terminal(), terminal);
}

#[test]
fn pipeline_job_id_is_zero_padded() {
    let id = JobId::pipeline("apoferritin", "Class3D", 12);
    assert_eq!(id.0, "apoferritin/Class3D/job012");
}

#[test]
fn storage_key_is_a_flat_file_name() {
    let id = JobId::pipeline("my project", "Refine3D", 7);
    let key = id.storage_key();
    assert!(!key.contains('/'));
    assert!(!key.contains(' '));
    assert_eq!(key, "my_project~Refine3D~job007");
}

#[test]
fn scheduler_ids_do_not_collide_with_pipeline_ids() {
    let sched = JobId::scheduler("100");
    assert_eq!(sched.0, "sched/100");
    assert_ne!(sched.storage_key(), JobId::new("sched_100").storage_key());
}

#[parameterized(
    extract = { "Extract", JobType::Extract },
    multibody = { "MultiBody", JobType::MultiBodyRefinement },
    lowercase = { "class3d", JobType::Class3D },
)]
fn job_type_parses_from_dir_name(name: &str, expected: JobType) {
    assert_eq!(name.parse::<JobType>().unwrap(), expected);
}

#[test]
fn unknown_stage_does_not_parse() {
    assert!("MotionCorr".parse::<JobType>().is_err());
}

#[parameterized(
    enriched = { "Refine3D", JobType::Refine3D },
    motion_corr = { "MotionCorr", JobType::Unknown },
    class2d = { "Class2D", JobType::Unknown },
)]
fn stage_directories_classify(stage: &str, expected: JobType) {
    assert_eq!(JobType::from_stage(stage), expected);
}

#[test]
fn transition_display_and_change() {
    let t = Transition::new(JobState::Running, JobState::Finished);
    assert_eq!(t.to_string(), "Running -> Finished");
    assert!(t.is_change());
    assert!(!Transition::new(JobState::Finished, JobState::Finished).is_change());
}

#[test]
fn labels_name_project_and_stage() {
    let job = Job::pipeline("apo", "Extract", 3, PathBuf::from("/p/Extract/job003"));
    assert_eq!(job.label(), "[apo] Extract/job003");

    let job = Job::pipeline("apo", "Class2D", 8, PathBuf::from("/p/Class2D/job008"));
    assert_eq!(job.job_type, JobType::Unknown);
    assert_eq!(job.id, JobId::new("apo/Class2D/job008"));
    assert_eq!(job.label(), "[apo] Class2D/job008");

    let job = Job::scheduler("100", "align");
    assert_eq!(job.label(), "align (sched/100)");
}
