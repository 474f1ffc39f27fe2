// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification transport

mod webhook;

pub use webhook::WebhookNotifier;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

use jw_core::Payload;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
    #[error("transport rejected payload: {0}")]
    Rejected(String),
}

/// Adapter trait for delivering notification payloads
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    fn send(&self, payload: &Payload) -> Result<(), NotifyError>;
}

/// Transport that drops every payload.
///
/// Used when no transport is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifyAdapter;

impl NoOpNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl NotifyAdapter for NoOpNotifyAdapter {
    fn send(&self, _payload: &Payload) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// `None` drops payloads, `Some` delivers through the inner transport
impl<N: NotifyAdapter> NotifyAdapter for Option<N> {
    fn send(&self, payload: &Payload) -> Result<(), NotifyError> {
        match self {
            Some(inner) => inner.send(payload),
            None => Ok(()),
        }
    }
}
