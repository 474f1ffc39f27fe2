// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

const SACCT: &str = "\
JobID           JobName      State        ExitCode
------------ ---------- ---------- --------
100                P1J3    RUNNING      0:0
100.batch         batch    RUNNING      0:0
100_1             P1J3    RUNNING      0:0
101           relion_a  COMPLETED      0:0
102           relion_b  CANCELLED by 1000      0:15
103            cut      FAILED
104            oom   OUT_OF_ME+      0:125
";

#[test]
fn table_rows_are_parsed_in_order() {
    let rows = parse_accounting(SACCT);
    let ids: Vec<_> = rows.iter().map(|r| r.job_id.as_str()).collect();
    assert_eq!(ids, vec!["100", "100.batch", "100_1", "101", "102", "104"]);
}

#[test]
fn steps_record_their_parent() {
    let rows = parse_accounting(SACCT);
    assert!(!rows[0].is_step());
    assert_eq!(rows[1].parent_id.as_deref(), Some("100"));
    assert!(rows[1].is_step());
    assert_eq!(rows[2].parent_id.as_deref(), Some("100"));
}

#[test]
fn multi_token_state_and_exit_code() {
    let rows = parse_accounting(SACCT);
    let cancelled = &rows[4];
    assert_eq!(cancelled.name, "relion_b");
    assert_eq!(cancelled.state, "CANCELLED by 1000");
    assert_eq!(cancelled.exit_code, 0);
    assert_eq!(cancelled.job_state(), Some(JobState::UserAbort));
}

#[test]
fn short_line_is_an_error_not_a_panic() {
    assert_eq!(
        parse_line(7, "103 cut FAILED"),
        Err(EvidenceReadError::TooShort { line: 7, found: 3 })
    );
}

#[test]
fn non_numeric_exit_code_is_rejected() {
    let err = parse_line(2, "105 name RUNNING abc").unwrap_err();
    assert!(matches!(err, EvidenceReadError::BadExitCode { line: 2, .. }));
}

#[test]
fn widened_columns_are_tolerated() {
    let line = format!("{:>30} {:>40} {:>30} {:>8}", "200", "P2J14", "COMPLETED", "1:0");
    let row = parse_line(1, &line).unwrap();
    assert_eq!(row.job_id, "200");
    assert_eq!(row.name, "P2J14");
    assert_eq!(row.exit_code, 1);
    assert_eq!(row.job_state(), Some(JobState::Finished));
}

#[parameterized(
    spaced_name = { "200 my job RUNNING 0:0", "my job", "RUNNING" },
    name_with_state_word = { "201 rerun FAILED maps COMPLETED 0:0", "rerun FAILED maps", "COMPLETED" },
    spaced_name_cancelled_by = { "202 motion corr CANCELLED by 1000 0:15", "motion corr", "CANCELLED by 1000" },
    spaced_name_truncated = { "203 class 2d OUT_OF_ME+ 0:125", "class 2d", "OUT_OF_ME+" },
    lowercase_state = { "204 two words running 0:0", "two words", "running" },
    unknown_state = { "205 single SPECIAL_EXIT 0:0", "single", "SPECIAL_EXIT" },
)]
fn names_and_states_split_at_the_state_word(line: &str, name: &str, state: &str) {
    let row = parse_line(1, line).unwrap();
    assert_eq!(row.name, name);
    assert_eq!(row.state, state);
}

#[test]
fn spaced_name_resolves_its_state() {
    let rows = parse_accounting("JobID JobName State ExitCode\n200 my job RUNNING 0:0\n");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "my job");
    assert_eq!(rows[0].job_state(), Some(JobState::Running));
}

#[parameterized(
    pending = { "PENDING", Some(JobState::Pending) },
    running = { "RUNNING", Some(JobState::Running) },
    completed = { "COMPLETED", Some(JobState::Finished) },
    cancelled_truncated = { "CANCELLED+", Some(JobState::UserAbort) },
    oom_truncated = { "OUT_OF_ME+", Some(JobState::Failed) },
    timeout = { "TIMEOUT", Some(JobState::Failed) },
    lowercase = { "running", Some(JobState::Running) },
    ambiguous_prefix = { "COMPL+", None },
    unknown = { "SPECIAL_EXIT", None },
    empty = { "", None },
)]
fn scheduler_state_mapping(raw: &str, expected: Option<JobState>) {
    assert_eq!(scheduler_state(raw), expected);
}

proptest! {
    #[test]
    fn parser_never_panics(text in "\\PC{0,200}") {
        let _ = parse_accounting(&text);
    }

    #[test]
    fn well_formed_rows_round_trip_fields(
        id in "[0-9]{1,8}",
        name in "[A-Za-z0-9_]{1,20}",
        code in 0i32..256,
    ) {
        let line = format!("{} {} COMPLETED {}:0", id, name, code);
        let row = parse_line(1, &line).unwrap();
        prop_assert_eq!(row.job_id, id);
        prop_assert_eq!(row.name, name);
        prop_assert_eq!(row.exit_code, code);
    }
}
