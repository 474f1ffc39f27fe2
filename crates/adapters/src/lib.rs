// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the watcher's external collaborators: the notification
//! transport, the image renderer and the scheduler accounting source.

pub mod accounting;
pub mod notify;
pub mod render;
pub mod traced;

pub use accounting::{AccountingError, AccountingFile, AccountingSource, NoAccounting, SacctCommand};
pub use notify::{NoOpNotifyAdapter, NotifyAdapter, NotifyError, WebhookNotifier};
pub use render::{CommandRenderer, NoOpRenderer, RenderError, Renderer};
pub use traced::{TracedAccounting, TracedNotifyAdapter, TracedRenderer};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use accounting::FakeAccounting;
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use render::{FakeRenderer, RenderCall};
