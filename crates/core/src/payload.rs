// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification payloads handed to the transport

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// What an attachment contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Curve,
    Document,
}

impl AttachmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Curve => "curve",
            Self::Document => "document",
        }
    }
}

/// Where the attachment content lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub name: String,
    pub source: AttachmentSource,
}

impl Attachment {
    pub fn file(kind: AttachmentKind, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            kind,
            name,
            source: AttachmentSource::Path(path),
        }
    }

    pub fn bytes(kind: AttachmentKind, name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind,
            name: name.into(),
            source: AttachmentSource::Bytes(data),
        }
    }
}

/// A message plus zero or more attachments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pub message: String,
    pub attachments: Vec<Attachment>,
}

impl Payload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Append a line to the message body
    pub fn push_line(&mut self, line: impl AsRef<str>) {
        if !self.message.is_empty() {
            self.message.push('\n');
        }
        self.message.push_str(line.as_ref());
    }

    /// SHA-256 over the message and attachment references, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.message.as_bytes());
        for attachment in &self.attachments {
            hasher.update([0u8]);
            hasher.update(attachment.kind.as_str().as_bytes());
            hasher.update(attachment.name.as_bytes());
            match &attachment.source {
                AttachmentSource::Path(path) => {
                    hasher.update(path.to_string_lossy().as_bytes())
                }
                AttachmentSource::Bytes(data) => hasher.update(data),
            }
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

#[derive(Debug, Error)]
#[error("unknown display mode: {0} (expected slice or projection)")]
pub struct ParseDisplayModeError(pub String);

/// How density maps are rendered into images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Slice,
    Projection,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slice => "slice",
            Self::Projection => "projection",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = ParseDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slice" | "slices" => Ok(Self::Slice),
            "projection" | "projections" => Ok(Self::Projection),
            _ => Err(ParseDisplayModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
