// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fingerprint_is_stable_for_equal_payloads() {
    let a = Payload::new("Extract finished").with_attachment(Attachment::file(
        AttachmentKind::Image,
        "/data/p/Extract/job003/.jobwatch/particles.png",
    ));
    let b = a.clone();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint().len(), 64);
}

#[test]
fn fingerprint_changes_with_attachment_content() {
    let a = Payload::new("curve")
        .with_attachment(Attachment::bytes(AttachmentKind::Curve, "fsc.csv", b"1,2".to_vec()));
    let b = Payload::new("curve")
        .with_attachment(Attachment::bytes(AttachmentKind::Curve, "fsc.csv", b"1,3".to_vec()));
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn push_line_separates_with_newlines() {
    let mut payload = Payload::default();
    payload.push_line("first");
    payload.push_line("second");
    assert_eq!(payload.message, "first\nsecond");
}

#[test]
fn file_attachment_takes_file_name() {
    let attachment = Attachment::file(AttachmentKind::Document, "/x/y/logfile.pdf");
    assert_eq!(attachment.name, "logfile.pdf");
}

#[test]
fn display_mode_parses_both_spellings() {
    assert_eq!("Projection".parse::<DisplayMode>().unwrap(), DisplayMode::Projection);
    assert_eq!("slices".parse::<DisplayMode>().unwrap(), DisplayMode::Slice);
    assert!("volume".parse::<DisplayMode>().is_err());
    assert_eq!(DisplayMode::default(), DisplayMode::Slice);
}
