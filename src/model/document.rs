// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// A wiki page as returned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPage {
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// A historical note on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub private_notes: bool,
}

impl Journal {
    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Oldest first, as the store lists them.
    #[serde(default)]
    pub journals: Vec<Journal>,
}

impl Issue {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// The document whose text references the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostDocument {
    WikiPage(WikiPage),
    Issue(Issue),
}
