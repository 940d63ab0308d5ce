// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote document store contract.
//!
//! The orchestrator only talks to the store through [`DocumentStore`]; [`RedmineStore`] is the
//! REST implementation used in production.

mod path;
pub mod redmine;

pub use path::DocumentPath;
pub use redmine::RedmineStore;

use std::fmt;

use serde::Serialize;

use crate::model::{AttachmentRecord, HostDocument};

/// A failed remote call: network failure or non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// HTTP status, absent when no response arrived.
    pub status: Option<u16>,
    /// Validation messages the store returned in its `errors` array.
    pub errors: Vec<String>,
    pub message: String,
}

impl TransportError {
    pub fn http(status: u16, errors: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            errors,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            errors: Vec::new(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.message)?,
            None => f.write_str(&self.message)?,
        }
        if !self.errors.is_empty() {
            write!(f, " ({})", self.errors.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for TransportError {}

/// Reference to uploaded bytes, valid until attached to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadToken(pub String);

/// Attaches an upload to the document being updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRef {
    pub token: String,
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateBody {
    WikiPage {
        text: String,
        comments: String,
    },
    Issue {
        description: String,
        /// A new note on the issue, when a journal referenced the diagram.
        notes: Option<String>,
        private_notes: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub body: UpdateBody,
    pub attachments: Vec<AttachmentRef>,
}

/// Remote calls the orchestrator sequences. Calls are issued one at a time.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadToken, TransportError>;

    async fn fetch_document(
        &self,
        path: &DocumentPath,
        include_journals: bool,
    ) -> Result<HostDocument, TransportError>;

    async fn update_document(
        &self,
        path: &DocumentPath,
        update: &DocumentUpdate,
    ) -> Result<(), TransportError>;

    async fn fetch_attachments(
        &self,
        path: &DocumentPath,
    ) -> Result<Vec<AttachmentRecord>, TransportError>;

    /// Stores the bytes as a new version in the external document store.
    async fn put_external(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), TransportError>;
}
