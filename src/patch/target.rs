// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::locate_macro;
use crate::model::HostDocument;

/// The part of a host document that holds the diagram's macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    WikiText,
    IssueDescription,
    /// Index into the issue's journals (oldest first).
    JournalNote(usize),
}

/// Finds where the macro referencing `resource` lives.
///
/// Journals are scanned newest first and win over the description; `None` when nothing in the
/// document references the resource.
pub fn resolve_target(document: &HostDocument, tag: &str, resource: &str) -> Option<PatchTarget> {
    match document {
        HostDocument::WikiPage(page) => {
            locate_macro(&page.text, tag, resource).map(|_| PatchTarget::WikiText)
        }
        HostDocument::Issue(issue) => issue
            .journals
            .iter()
            .enumerate()
            .rev()
            .find(|(_, journal)| locate_macro(journal.notes(), tag, resource).is_some())
            .map(|(index, _)| PatchTarget::JournalNote(index))
            .or_else(|| {
                locate_macro(issue.description(), tag, resource)
                    .map(|_| PatchTarget::IssueDescription)
            }),
    }
}
