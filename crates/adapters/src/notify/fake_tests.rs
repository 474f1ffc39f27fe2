// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_notify_records_payloads() {
    let adapter = FakeNotifyAdapter::new();

    adapter.send(&Payload::new("job started")).unwrap();
    adapter.send(&Payload::new("job finished")).unwrap();

    let sent = adapter.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].message, "job started");
    assert_eq!(sent[1].message, "job finished");
}

#[test]
fn fake_notify_can_fail_on_demand() {
    let adapter = FakeNotifyAdapter::new();
    adapter.set_failing(true);

    assert!(adapter.send(&Payload::new("lost")).is_err());
    assert!(adapter.sent().is_empty());

    adapter.set_failing(false);
    adapter.send(&Payload::new("delivered")).unwrap();
    assert_eq!(adapter.sent().len(), 1);
}
