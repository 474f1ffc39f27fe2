// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::accounting::{AccountingError, AccountingSource};
use crate::notify::{NotifyAdapter, NotifyError};
use crate::render::{RenderError, Renderer};
use jw_core::{DisplayMode, Payload};
use std::path::Path;

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    fn send(&self, payload: &Payload) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.send", attachments = payload.attachments.len());
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.send(payload);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "delivered"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "delivery failed"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any Renderer
#[derive(Clone)]
pub struct TracedRenderer<R> {
    inner: R,
}

impl<R> TracedRenderer<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Renderer> Renderer for TracedRenderer<R> {
    fn render(&self, input: &Path, output: &Path, mode: DisplayMode) -> Result<(), RenderError> {
        let span = tracing::info_span!("render", input = %input.display(), mode = %mode);
        let _guard = span.enter();

        // Precondition: the map must exist
        if !input.exists() {
            tracing::warn!("input map does not exist");
        }

        let start = std::time::Instant::now();
        let result = self.inner.render(input, output, mode);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::debug!(
                output = %output.display(),
                elapsed_ms = elapsed.as_millis() as u64,
                "rendered"
            ),
            // Disabled renderer is the normal unconfigured case
            Err(RenderError::Disabled) => tracing::trace!("renderer disabled"),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "render failed"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any AccountingSource
#[derive(Clone)]
pub struct TracedAccounting<A> {
    inner: A,
}

impl<A> TracedAccounting<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

impl<A: AccountingSource> AccountingSource for TracedAccounting<A> {
    fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    fn fetch(&self) -> Result<String, AccountingError> {
        let start = std::time::Instant::now();
        let result = self.inner.fetch();
        let elapsed = start.elapsed();

        match &result {
            Ok(text) => tracing::debug!(
                lines = text.lines().count(),
                elapsed_ms = elapsed.as_millis() as u64,
                "fetched accounting"
            ),
            Err(e) => tracing::warn!(error = %e, "accounting fetch failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
