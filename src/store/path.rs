// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use reqwest::Url;

/// Path of a wiki page or issue relative to the store root, without the `.json` suffix.
///
/// Usually the pathname of the page the diagram was opened from, e.g.
/// `/redmine/projects/demo/wiki/Start` or `/issues/42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".json").unwrap_or(path);
        Self(path.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Points the path at `page_name` when it does not already end with it.
    ///
    /// The project's main wiki page is served from `/wiki` alone, so the page name has to be
    /// appended before the page can be read as JSON. An empty page name means the document is
    /// not a wiki page.
    pub fn for_page(&self, page_name: &str) -> Self {
        if page_name.is_empty() {
            return self.clone();
        }

        let encoded = encode_segment(page_name);
        let lower = self.0.to_lowercase();
        let already_there = [encoded.as_str(), page_name]
            .iter()
            .any(|name| lower.ends_with(&format!("/wiki/{}", name.to_lowercase())));

        if already_there {
            self.clone()
        } else {
            Self(format!("{}/{encoded}", self.0))
        }
    }

    /// Appends the page title when the path still addresses the wiki root.
    pub fn for_wiki_title(&self, title: &str) -> Self {
        if self.0.ends_with("/wiki") && !title.is_empty() {
            Self(format!("{}/{}", self.0, encode_segment(title)))
        } else {
            self.clone()
        }
    }

    /// The JSON resource URL for this path under `base`.
    pub fn json_url(&self, base: &Url) -> Result<Url, String> {
        base.join(&format!("{}.json", self.0))
            .map_err(|err| format!("invalid document path {:?}: {err}", self.0))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encodes a single path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return segment.to_owned();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }
    url.path().trim_start_matches('/').to_owned()
}
