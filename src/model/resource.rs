// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where the diagram bytes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Attached to the hosting wiki page or issue.
    Attachment,
    /// Versioned in a separate document store (DMSF) reached through WebDAV.
    ExternalStore,
}

/// The three diagram representations the editor round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MimeKind {
    /// SVG with the diagram model embedded in its `content` attribute.
    VectorMarkup,
    /// PNG with the diagram model embedded in a text chunk.
    RasterMarkup,
    /// The bare diagram XML, rendered client-side by the viewer.
    RawMarkup,
}

impl MimeKind {
    /// Derives the kind from a file name; unknown or missing extensions map to raw markup.
    pub fn from_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("svg") => Self::VectorMarkup,
            Some("png") => Self::RasterMarkup,
            _ => Self::RawMarkup,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::VectorMarkup => "image/svg+xml",
            Self::RasterMarkup => "image/png",
            Self::RawMarkup => "application/xml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::VectorMarkup => "svg",
            Self::RasterMarkup => "png",
            Self::RawMarkup => "xml",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramResource {
    name: String,
    storage_kind: StorageKind,
    mime_kind: MimeKind,
}

impl DiagramResource {
    pub fn new(name: impl Into<String>, storage_kind: StorageKind) -> Result<Self, ResourceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ResourceError::EmptyName);
        }
        if name.contains(|c| c == '\n' || c == '\r') {
            return Err(ResourceError::LineBreak);
        }

        let mime_kind = MimeKind::from_name(&name);
        Ok(Self {
            name,
            storage_kind,
            mime_kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.storage_kind
    }

    pub fn mime_kind(&self) -> MimeKind {
        self.mime_kind
    }

    pub fn is_external(&self) -> bool {
        self.storage_kind == StorageKind::ExternalStore
    }
}

impl fmt::Display for DiagramResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("diagram name must not be empty")]
    EmptyName,
    #[error("diagram name must not contain line breaks")]
    LineBreak,
}
