// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory store used by orchestrator and session tests.

use std::cell::RefCell;

use super::SyncStep;
use crate::model::{AttachmentRecord, AuthorRef, HostDocument, WikiPage};
use crate::store::{DocumentPath, DocumentStore, DocumentUpdate, TransportError, UploadToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Upload { filename: String, size: usize },
    FetchDocument { path: String, include_journals: bool },
    UpdateDocument { path: String, update: DocumentUpdate },
    FetchAttachments { path: String },
    PutExternal { name: String, content_type: String, size: usize },
}

#[derive(Debug)]
pub(crate) struct FakeStore {
    pub calls: RefCell<Vec<Call>>,
    pub document: HostDocument,
    pub attachments: Vec<AttachmentRecord>,
    pub failure: Option<(SyncStep, TransportError)>,
    pub refresh_error: Option<TransportError>,
}

impl FakeStore {
    pub fn new(document: HostDocument) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            document,
            attachments: Vec::new(),
            failure: None,
            refresh_error: None,
        }
    }

    pub fn wiki(title: &str, text: &str) -> Self {
        Self::new(HostDocument::WikiPage(WikiPage {
            title: title.to_owned(),
            text: text.to_owned(),
        }))
    }

    pub fn with_attachments(mut self, attachments: Vec<AttachmentRecord>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn failing_at(mut self, step: SyncStep, err: TransportError) -> Self {
        self.failure = Some((step, err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn updates(&self) -> Vec<(String, DocumentUpdate)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::UpdateDocument { path, update } => Some((path.clone(), update.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, step: SyncStep) -> Result<(), TransportError> {
        match &self.failure {
            Some((failing, err)) if *failing == step => Err(err.clone()),
            _ => Ok(()),
        }
    }
}

impl DocumentStore for FakeStore {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadToken, TransportError> {
        self.record(Call::Upload {
            filename: filename.to_owned(),
            size: bytes.len(),
        });
        self.check(SyncStep::Upload)?;
        Ok(UploadToken(format!("token-{filename}")))
    }

    async fn fetch_document(
        &self,
        path: &DocumentPath,
        include_journals: bool,
    ) -> Result<HostDocument, TransportError> {
        self.record(Call::FetchDocument {
            path: path.to_string(),
            include_journals,
        });
        self.check(SyncStep::FetchDocument)?;
        Ok(self.document.clone())
    }

    async fn update_document(
        &self,
        path: &DocumentPath,
        update: &DocumentUpdate,
    ) -> Result<(), TransportError> {
        self.record(Call::UpdateDocument {
            path: path.to_string(),
            update: update.clone(),
        });
        self.check(SyncStep::UpdateDocument)
    }

    async fn fetch_attachments(
        &self,
        path: &DocumentPath,
    ) -> Result<Vec<AttachmentRecord>, TransportError> {
        self.record(Call::FetchAttachments {
            path: path.to_string(),
        });
        match &self.refresh_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.attachments.clone()),
        }
    }

    async fn put_external(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), TransportError> {
        self.record(Call::PutExternal {
            name: name.to_owned(),
            content_type: content_type.to_owned(),
            size: bytes.len(),
        });
        self.check(SyncStep::PutExternal)
    }
}

pub(crate) fn attachment(id: u64, filename: &str) -> AttachmentRecord {
    AttachmentRecord {
        id,
        filename: filename.to_owned(),
        content_url: format!("http://localhost:3000/attachments/download/{id}/{filename}"),
        filesize: 512,
        created_on: chrono::DateTime::parse_from_rfc3339("2026-03-14T15:09:26+00:00")
            .expect("fixed timestamp"),
        author: AuthorRef {
            id: 1,
            name: "Admin".to_owned(),
        },
    }
}
