// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;

#[test]
fn placeholders_are_substituted() {
    let renderer = CommandRenderer::new("mapview");
    let args = renderer.expand_args(
        Path::new("/j/run_class001.mrc"),
        Path::new("/j/.jobwatch/run_class001.png"),
        DisplayMode::Projection,
    );
    assert_eq!(
        args,
        vec![
            "/j/run_class001.mrc",
            "/j/.jobwatch/run_class001.png",
            "--mode",
            "projection"
        ]
    );
}

#[test]
fn custom_args_keep_literal_text() {
    let renderer = CommandRenderer::new("sh").with_args(vec!["--out={output}".to_string()]);
    let args = renderer.expand_args(Path::new("in"), Path::new("out.png"), DisplayMode::Slice);
    assert_eq!(args, vec!["--out=out.png"]);
}

#[test]
fn missing_program_is_a_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = CommandRenderer::new("jw-definitely-not-installed");
    let err = renderer
        .render(Path::new("in.mrc"), &dir.path().join("out.png"), DisplayMode::Slice)
        .unwrap_err();
    assert!(matches!(err, RenderError::Spawn { .. }));
}

#[test]
fn successful_command_must_produce_output() {
    let dir = tempfile::tempdir().unwrap();
    let output: PathBuf = dir.path().join("out.png");

    let touch = CommandRenderer::new("sh").with_args(vec![
        "-c".to_string(),
        "echo image > \"$0\"".to_string(),
        "{output}".to_string(),
    ]);
    touch
        .render(Path::new("in.mrc"), &output, DisplayMode::Slice)
        .unwrap();
    assert!(output.exists());

    let silent = CommandRenderer::new("true").with_args(vec![]);
    let err = silent
        .render(Path::new("in.mrc"), &dir.path().join("none.png"), DisplayMode::Slice)
        .unwrap_err();
    assert!(matches!(err, RenderError::MissingOutput(_)));
}

#[test]
fn failing_command_reports_status() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = CommandRenderer::new("false").with_args(vec![]);
    let err = renderer
        .render(Path::new("in.mrc"), &dir.path().join("x.png"), DisplayMode::Slice)
        .unwrap_err();
    assert!(matches!(err, RenderError::Failed { .. }));
}
