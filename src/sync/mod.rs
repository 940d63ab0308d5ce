// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote sync orchestration.
//!
//! A save runs as a strict sequence of awaited store calls: upload, fetch the hosting document,
//! patch its reference macro, write it back with the upload attached, refresh the on-page
//! attachment list. Any transport failure aborts the remaining steps; a failed refresh is only
//! logged because the document is already consistent at that point.

pub mod attachments;
mod failure;

pub use attachments::{append_record, render_row, AttachmentList, NoAttachmentList, TEMPLATE_ROW};
pub use failure::{SaveFailure, SyncError, SyncStep};

use tracing::{debug, info, warn};

use crate::model::{tag_for, AttachmentRecord, DiagramResource, HostDocument, StorageKind};
use crate::patch::{patch_document, DocumentPatch};
use crate::store::{AttachmentRef, DocumentPath, DocumentStore, DocumentUpdate};

/// What a successful save did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistReport {
    pub resource: String,
    /// Whether a reference macro was found and rewritten.
    pub macro_found: bool,
    /// Whether an issue note was added alongside the description.
    pub note_added: bool,
    /// The attachment appended to the on-page list, if the refresh succeeded.
    pub attachment: Option<AttachmentRecord>,
}

impl PersistReport {
    pub fn list_refreshed(&self) -> bool {
        self.attachment.is_some()
    }
}

/// Stores exported diagram bytes. The session only sees this seam.
#[allow(async_fn_in_trait)]
pub trait Persist {
    async fn persist(
        &mut self,
        resource: &DiagramResource,
        bytes: Vec<u8>,
    ) -> Result<PersistReport, SyncError>;
}

/// Where the diagram was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub document: DocumentPath,
    /// Wiki page name; empty for issues.
    pub page_name: String,
    /// Name the diagram had when the editor was opened, used in the wiki change comment.
    pub original_name: String,
}

impl SaveTarget {
    pub fn new(document: DocumentPath) -> Self {
        Self {
            document,
            page_name: String::new(),
            original_name: String::new(),
        }
    }

    pub fn with_page_name(mut self, page_name: impl Into<String>) -> Self {
        self.page_name = page_name.into();
        self
    }

    pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = original_name.into();
        self
    }

    fn comments(&self, resource: &DiagramResource) -> String {
        let original = if self.original_name.is_empty() {
            resource.name()
        } else {
            &self.original_name
        };
        format!("{original} -> {}", resource.name())
    }
}

pub struct Synchronizer<S, L> {
    store: S,
    list: L,
    target: SaveTarget,
    journal_notes: bool,
}

impl<S: DocumentStore, L: AttachmentList> Synchronizer<S, L> {
    pub fn new(store: S, list: L, target: SaveTarget) -> Self {
        Self {
            store,
            list,
            target,
            journal_notes: true,
        }
    }

    pub fn with_journal_notes(mut self, journal_notes: bool) -> Self {
        self.journal_notes = journal_notes;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn target(&self) -> &SaveTarget {
        &self.target
    }

    async fn save_external(
        &mut self,
        resource: &DiagramResource,
        bytes: Vec<u8>,
    ) -> Result<PersistReport, SyncError> {
        let mime_type = resource.mime_kind().mime_type();
        self.store
            .put_external(resource.name(), bytes, mime_type)
            .await
            .map_err(SyncError::at(SyncStep::PutExternal))?;
        info!(resource = resource.name(), "stored diagram in external store");

        Ok(PersistReport {
            resource: resource.name().to_owned(),
            ..PersistReport::default()
        })
    }

    async fn save_attachment(
        &mut self,
        resource: &DiagramResource,
        bytes: Vec<u8>,
    ) -> Result<PersistReport, SyncError> {
        let name = resource.name();
        let token = self
            .store
            .upload(name, bytes)
            .await
            .map_err(SyncError::at(SyncStep::Upload))?;
        debug!(resource = name, "upload accepted");

        let fetch_path = self.target.document.for_page(&self.target.page_name);
        let document = self
            .store
            .fetch_document(&fetch_path, true)
            .await
            .map_err(SyncError::at(SyncStep::FetchDocument))?;

        let update_path = match &document {
            HostDocument::WikiPage(page) => fetch_path.for_wiki_title(&page.title),
            HostDocument::Issue(_) => fetch_path,
        };

        let patch = patch_document(
            &document,
            tag_for(StorageKind::Attachment),
            name,
            self.journal_notes,
        );
        let macro_found = patch.macro_found();
        if !macro_found {
            debug!(resource = name, path = %update_path, "no reference macro found");
        }
        let note_added = matches!(patch, DocumentPatch::Issue { note: Some(_), .. });

        let update = DocumentUpdate {
            body: patch.into_update_body(self.target.comments(resource)),
            attachments: vec![AttachmentRef {
                token: token.0,
                filename: name.to_owned(),
                content_type: resource.mime_kind().mime_type().to_owned(),
            }],
        };
        self.store
            .update_document(&update_path, &update)
            .await
            .map_err(SyncError::at(SyncStep::UpdateDocument))?;
        info!(resource = name, path = %update_path, macro_found, "document updated");

        let attachment = self.refresh_list(&update_path).await;

        Ok(PersistReport {
            resource: name.to_owned(),
            macro_found,
            note_added,
            attachment,
        })
    }

    async fn refresh_list(&mut self, path: &DocumentPath) -> Option<AttachmentRecord> {
        let records = match self.store.fetch_attachments(path).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%path, error = %err, "could not refresh the attachment list");
                return None;
            }
        };
        let Some(last) = records.into_iter().last() else {
            warn!(%path, "document lists no attachments after the update");
            return None;
        };
        append_record(&mut self.list, &last);
        Some(last)
    }
}

impl<S: DocumentStore, L: AttachmentList> Persist for Synchronizer<S, L> {
    async fn persist(
        &mut self,
        resource: &DiagramResource,
        bytes: Vec<u8>,
    ) -> Result<PersistReport, SyncError> {
        debug!(resource = resource.name(), size = bytes.len(), "persisting diagram");
        match resource.storage_kind() {
            StorageKind::ExternalStore => self.save_external(resource, bytes).await,
            StorageKind::Attachment => self.save_attachment(resource, bytes).await,
        }
    }
}

#[cfg(test)]
pub(crate) mod fake;
