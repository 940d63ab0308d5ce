// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::StorageKind;
use crate::store::TransportError;

/// The remote call a save was on when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Upload,
    FetchDocument,
    UpdateDocument,
    PutExternal,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Upload => "upload",
            Self::FetchDocument => "document fetch",
            Self::UpdateDocument => "document update",
            Self::PutExternal => "external store write",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("{step} failed: {source}")]
    Transport {
        step: SyncStep,
        #[source]
        source: TransportError,
    },
}

impl SyncError {
    pub(crate) fn at(step: SyncStep) -> impl FnOnce(TransportError) -> Self {
        move |source| Self::Transport { step, source }
    }

    pub fn step(&self) -> SyncStep {
        match self {
            Self::Transport { step, .. } => *step,
        }
    }

    pub fn failure(&self, storage_kind: StorageKind) -> SaveFailure {
        match self {
            Self::Transport { source, .. } => SaveFailure::from_transport(source, storage_kind),
        }
    }
}

/// The message shown to the user when a save fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFailure {
    /// Validation errors reported by the store, shown verbatim.
    Rejected(Vec<String>),
    Unauthorized,
    /// The external document store has no such document or folder.
    ExternalNotFound,
    /// The attachment could not be saved (the document was not found).
    SaveError,
    Conflict,
    Unprocessable,
    BadGateway,
    Other(String),
}

impl SaveFailure {
    pub fn from_transport(err: &TransportError, storage_kind: StorageKind) -> Self {
        if !err.errors.is_empty() {
            return Self::Rejected(err.errors.clone());
        }

        match err.status {
            Some(401) => Self::Unauthorized,
            Some(404) if storage_kind == StorageKind::ExternalStore => Self::ExternalNotFound,
            Some(404) => Self::SaveError,
            Some(409) => Self::Conflict,
            Some(422) => Self::Unprocessable,
            Some(502) => Self::BadGateway,
            _ => Self::Other(err.message.clone()),
        }
    }
}

impl fmt::Display for SaveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(errors) => f.write_str(&errors.join(", ")),
            Self::Unauthorized => f.write_str(
                "unauthorized; check that the REST web service is enabled and your API key is valid",
            ),
            Self::ExternalNotFound => {
                f.write_str("document not found; check that the DMSF folder exists and is writable")
            }
            Self::SaveError => f.write_str("the diagram could not be saved"),
            Self::Conflict => {
                f.write_str("conflict; the document was modified by someone else, reload and retry")
            }
            Self::Unprocessable => f.write_str("the document store refused the update"),
            Self::BadGateway => f.write_str("bad gateway; the document store is unreachable"),
            Self::Other(message) => f.write_str(message),
        }
    }
}
