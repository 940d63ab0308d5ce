// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-facing notifications raised by a session.

use std::fmt;

use crate::sync::SaveFailure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The whole diagram is empty; saving it would leave nothing on the page to click.
    EmptyDiagram,
    /// The page being saved (not the first one) is empty.
    EmptyDiagramPage,
    /// Persisting the diagram failed.
    SaveFailed(SaveFailure),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDiagram => f.write_str(
                "The diagram is empty and cannot be saved. Add something to it, or exit the editor to keep the placeholder.",
            ),
            Self::EmptyDiagramPage => f.write_str(
                "The current page of the diagram is empty. Switch to the first page, or add something to this one, before saving.",
            ),
            Self::SaveFailed(failure) => write!(f, "Error saving diagram: {failure}"),
        }
    }
}
