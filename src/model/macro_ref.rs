// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The `{{tag(name,key=value)}}` macro that references a diagram from wiki text.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::resource::StorageKind;

/// Macro for diagrams stored as attachments of the hosting document.
pub const ATTACH_TAG: &str = "drawio_attach";
/// Macro for diagrams versioned in the external document store.
pub const EXTERNAL_TAG: &str = "drawio_dmsf";

pub fn tag_for(storage_kind: StorageKind) -> &'static str {
    match storage_kind {
        StorageKind::Attachment => ATTACH_TAG,
        StorageKind::ExternalStore => EXTERNAL_TAG,
    }
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\{\{(\w+)(?:\((.*)\))?").expect("macro header regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroRef {
    tag: String,
    name: String,
    options: Vec<(String, String)>,
}

impl MacroRef {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    /// Parses a macro starting at the beginning of `text`.
    ///
    /// Both the full form and the bare header (`{{tag(args)` without the closing braces) are
    /// accepted. Arguments of the form `key=value` become options; the first positional argument
    /// is the diagram name, further positional arguments are ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = header_regex().captures(text)?;
        let tag = caps.get(1)?.as_str().to_owned();
        let args = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let mut name = None;
        let mut options = Vec::new();
        for arg in args.split(',') {
            let parts: Vec<&str> = arg.split('=').collect();
            match parts.as_slice() {
                [key, value] => options.push((key.trim().to_owned(), value.trim().to_owned())),
                _ => {
                    let positional = arg.trim();
                    if name.is_none() && !positional.is_empty() {
                        name = Some(positional.to_owned());
                    }
                }
            }
        }

        Some(Self {
            tag,
            name: name?,
            options,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }
}

impl fmt::Display for MacroRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{{{}({}{})}}}}",
            self.tag,
            self.name,
            render_options(&self.options)
        )
    }
}

fn render_options(options: &[(String, String)]) -> String {
    options
        .iter()
        .map(|(key, value)| format!(",{key}={value}"))
        .collect()
}
