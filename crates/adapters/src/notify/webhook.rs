// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat incoming-webhook transport (Slack-compatible JSON body)
//!
//! Webhooks cannot upload files, so file attachments are listed in the
//! message by name and location. Small text attachments (curve data) are
//! inlined as code blocks.

use super::{NotifyAdapter, NotifyError};
use jw_core::{AttachmentSource, Payload};
use serde_json::json;

/// Largest text attachment inlined into the message body
pub const INLINE_LIMIT: usize = 4096;

#[derive(Clone, Debug)]
pub struct WebhookNotifier {
    url: String,
    channel: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    fn build_body(&self, payload: &Payload) -> serde_json::Value {
        let mut text = payload.message.clone();
        for attachment in &payload.attachments {
            let kind = attachment.kind.as_str();
            let name = &attachment.name;
            match &attachment.source {
                AttachmentSource::Path(path) => {
                    text.push_str(&format!("\n• {kind} `{name}` ({})", path.display()));
                }
                AttachmentSource::Bytes(data) => match inline_text(data) {
                    Some(content) => text.push_str(&format!(
                        "\n• {kind} `{name}`:\n```\n{}\n```",
                        content.trim_end()
                    )),
                    None => text.push_str(&format!(
                        "\n• {kind} `{name}` ({} bytes, not shown)",
                        data.len()
                    )),
                },
            }
        }

        let mut body = json!({ "text": text });
        if let Some(channel) = &self.channel {
            body["channel"] = json!(channel);
        }
        body
    }
}

fn inline_text(data: &[u8]) -> Option<&str> {
    if data.len() > INLINE_LIMIT {
        return None;
    }
    std::str::from_utf8(data).ok()
}

impl NotifyAdapter for WebhookNotifier {
    fn send(&self, payload: &Payload) -> Result<(), NotifyError> {
        let body = self.build_body(payload).to_string();
        ureq::post(&self.url)
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => {
                    NotifyError::Rejected(format!("HTTP status {}", code))
                }
                other => NotifyError::Failed(other.to_string()),
            })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
