// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: u64,
    pub name: String,
}

/// An attachment as assigned by the document store after upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub id: u64,
    pub filename: String,
    pub content_url: String,
    pub filesize: u64,
    pub created_on: DateTime<FixedOffset>,
    pub author: AuthorRef,
}

impl AttachmentRecord {
    /// File size in KiB with two decimals, the way the attachment table prints it.
    pub fn size_label(&self) -> String {
        format!("{:.2}", self.filesize as f64 / 1024.0)
    }

    pub fn created_label(&self) -> String {
        self.created_on.format("%Y-%m-%d %H:%M").to_string()
    }

    /// The `/attachments` prefix of the content URL, e.g. `/redmine/attachments`.
    pub fn attachments_base(&self) -> &str {
        const DOWNLOAD: &str = "/attachments/download/";
        match self.content_url.find(DOWNLOAD) {
            Some(index) => &self.content_url[..index + "/attachments".len()],
            None => self
                .content_url
                .rsplit_once('/')
                .map(|(head, _)| head)
                .unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AttachmentRecord {
        serde_json::from_str(
            r#"{
                "id": 42,
                "filename": "flow.svg",
                "content_url": "https://host/redmine/attachments/download/42/flow.svg",
                "filesize": 3584,
                "created_on": "2026-03-04T09:15:30Z",
                "author": {"id": 5, "name": "Ada Admin"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn labels_follow_table_format() {
        let record = record();
        assert_eq!(record.size_label(), "3.50");
        assert_eq!(record.created_label(), "2026-03-04 09:15");
        assert_eq!(record.attachments_base(), "https://host/redmine/attachments");
    }
}
