// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON messages exchanged with the embedded editor frame.
//!
//! The editor speaks the draw.io embed protocol (`proto=json`): it emits `{"event": ...}`
//! objects and accepts `{"action": ...}` commands. Everything arrives over an untyped channel
//! that other frames can post to as well, so [`Envelope::authenticate`] is the only way an
//! inbound message reaches the session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a message source (a frame's content window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Bounds {
    /// A page with no extent in either direction has nothing to render.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaveEvent {
    /// The diagram model; the editor always sends it, only raw markup uses it.
    #[serde(default)]
    pub xml: Option<String>,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default, rename = "currentPage")]
    pub current_page: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExportEvent {
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExitEvent {
    #[serde(default)]
    pub modified: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum InboundMessage {
    Init,
    Save(SaveEvent),
    Export(ExportEvent),
    Exit(ExitEvent),
    /// Events this host does not react to (`configure`, `autosave`, ...).
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    XmlSvg,
    XmlPng,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum OutboundMessage {
    Load {
        #[serde(skip_serializing_if = "Option::is_none")]
        xml: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        xmlpng: Option<String>,
    },
    Export {
        format: ExportFormat,
        spin: String,
    },
}

impl OutboundMessage {
    pub fn load_xml(xml: impl Into<String>) -> Self {
        Self::Load {
            xml: Some(xml.into()),
            xmlpng: None,
        }
    }

    pub fn load_png(data_url: impl Into<String>) -> Self {
        Self::Load {
            xml: None,
            xmlpng: Some(data_url.into()),
        }
    }

    pub fn export(format: ExportFormat, spin: impl Into<String>) -> Self {
        Self::Export {
            format,
            spin: spin.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A raw message as delivered by the host page's message listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub source: FrameId,
    pub data: String,
}

impl Envelope {
    pub fn new(source: FrameId, data: impl Into<String>) -> Self {
        Self {
            source,
            data: data.into(),
        }
    }

    /// Parses the message if it comes from `frame` and carries a JSON payload.
    ///
    /// Foreign, empty and malformed messages yield `None`; the host page receives unrelated
    /// cross-origin messages routinely.
    pub fn authenticate(&self, frame: FrameId) -> Option<InboundMessage> {
        if self.source != frame || self.data.is_empty() {
            return None;
        }
        serde_json::from_str(&self.data).ok()
    }
}
