// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: diagram resources, host documents, attachments and reference macros.

pub mod attachment;
pub mod document;
pub mod macro_ref;
pub mod resource;

pub use attachment::{AttachmentRecord, AuthorRef};
pub use document::{HostDocument, Issue, Journal, WikiPage};
pub use macro_ref::{tag_for, MacroRef, ATTACH_TAG, EXTERNAL_TAG};
pub use resource::{DiagramResource, MimeKind, ResourceError, StorageKind};
