// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::{Attachment, AttachmentKind};

#[test]
fn body_carries_message_text() {
    let notifier = WebhookNotifier::new("http://localhost/hook");
    let body = notifier.build_body(&Payload::new("Class3D/job012: Running -> Finished"));

    assert_eq!(body["text"], "Class3D/job012: Running -> Finished");
    assert!(body.get("channel").is_none());
}

#[test]
fn body_lists_attachments_and_channel() {
    let notifier = WebhookNotifier::new("http://localhost/hook").with_channel("#cryoem");
    let payload = Payload::new("done")
        .with_attachment(Attachment::file(AttachmentKind::Image, "/p/map.png"))
        .with_attachment(Attachment::bytes(
            AttachmentKind::Curve,
            "fsc.csv",
            b"0.1,0.9\n".to_vec(),
        ));

    let body = notifier.build_body(&payload);
    let text = body["text"].as_str().unwrap();

    assert_eq!(body["channel"], "#cryoem");
    assert!(text.starts_with("done\n"));
    assert!(text.contains("image `map.png` (/p/map.png)"));
    assert!(text.contains("curve `fsc.csv`:\n```\n0.1,0.9\n```"));
}

#[test]
fn large_or_binary_attachments_are_summarized() {
    let notifier = WebhookNotifier::new("http://localhost/hook");
    let payload = Payload::new("done")
        .with_attachment(Attachment::bytes(
            AttachmentKind::Curve,
            "big.csv",
            vec![b'1'; INLINE_LIMIT + 1],
        ))
        .with_attachment(Attachment::bytes(AttachmentKind::Image, "raw.png", vec![0xff, 0xfe, 0x00]));

    let body = notifier.build_body(&payload);
    let text = body["text"].as_str().unwrap();

    assert!(text.contains(&format!("curve `big.csv` ({} bytes, not shown)", INLINE_LIMIT + 1)));
    assert!(text.contains("image `raw.png` (3 bytes, not shown)"));
}

#[test]
fn unreachable_endpoint_is_a_failure() {
    // Port 9 (discard) on localhost is not expected to accept HTTP
    let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook");
    let err = notifier.send(&Payload::new("x")).unwrap_err();
    assert!(matches!(err, NotifyError::Failed(_) | NotifyError::Rejected(_)));
}
