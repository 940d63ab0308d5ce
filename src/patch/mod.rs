// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Locating and rewriting diagram reference macros in document text.
//!
//! Everything here is a pure text transformation so it can be tested without a page or a
//! store. Matching is tolerant of the renames the store applies to colliding uploads: a macro
//! naming `diagram.png` is found for a resource stored as `diagram_2.png`.

mod target;

pub use target::{resolve_target, PatchTarget};

use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, NoExpand, Regex};

use crate::model::{HostDocument, MacroRef};
use crate::store::UpdateBody;

const OPTIONS_GROUP: &str = "options";

/// How the option tail of a rewritten macro is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroOptions {
    /// Keep whatever options the existing macro carries.
    Keep,
    /// Replace them with these `key=value` pairs.
    Replace(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroMatch {
    pub range: Range<usize>,
    /// The raw option tail, leading comma included (`, size=200`).
    pub options: Option<String>,
    /// The macro as written; `None` when its arguments carry no positional name.
    pub reference: Option<MacroRef>,
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    let has_word_extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_alphanumeric() || c == '_'));

    match name.rfind('.') {
        Some(dot) if has_word_extension && dot > 0 => (&name[..dot], Some(&name[dot..])),
        _ => (name, None),
    }
}

fn strip_dedup_suffix(stem: &str) -> &str {
    let Some(underscore) = stem.rfind('_') else {
        return stem;
    };
    let digits = &stem[underscore + 1..];
    if underscore > 0 && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        &stem[..underscore]
    } else {
        stem
    }
}

/// Builds the pattern matching any macro of kind `tag` that references `resource`.
///
/// The stem is matched literally except that `_` matches any character (the store replaces
/// unsafe characters with underscores); a `_<digits>` suffix and the extension are optional.
pub fn macro_regex(tag: &str, resource: &str) -> Result<Regex, regex::Error> {
    let (stem, extension) = split_extension(resource);
    let stem = regex::escape(strip_dedup_suffix(stem)).replace('_', ".");
    let extension = extension
        .map(|ext| format!("(?:{})?", regex::escape(ext)))
        .unwrap_or_default();

    Regex::new(&format!(
        r"\{{\{{{tag}\({stem}(?:_\d+)?{extension}(?P<{OPTIONS_GROUP}>\s*,.*)?\)\}}\}}",
        tag = regex::escape(tag),
    ))
}

pub fn locate_macro(text: &str, tag: &str, resource: &str) -> Option<MacroMatch> {
    let caps = macro_regex(tag, resource).ok()?.captures(text)?;
    let whole = caps.get(0)?;
    Some(MacroMatch {
        range: whole.range(),
        options: caps.name(OPTIONS_GROUP).map(|m| m.as_str().to_owned()),
        reference: MacroRef::parse(whole.as_str()),
    })
}

/// Rewrites the first macro referencing `resource` so it names `resource` exactly.
///
/// Text without a matching macro is returned unchanged (borrowed).
pub fn rewrite_macro<'a>(
    text: &'a str,
    tag: &str,
    resource: &str,
    options: &MacroOptions,
) -> Cow<'a, str> {
    let Ok(regex) = macro_regex(tag, resource) else {
        return Cow::Borrowed(text);
    };
    regex.replacen(text, 1, |caps: &Captures<'_>| match options {
        MacroOptions::Keep => {
            let tail = caps.name(OPTIONS_GROUP).map_or("", |m| m.as_str());
            format!("{{{{{tag}({resource}{tail})}}}}")
        }
        MacroOptions::Replace(pairs) => pairs
            .iter()
            .fold(MacroRef::new(tag, resource), |reference, (key, value)| {
                reference.with_option(key.as_str(), value.as_str())
            })
            .to_string(),
    })
}

fn fnlist_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:\n\n\{\{fnlist\}\})+\n*$").expect("fnlist regex"))
}

fn extensions_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\n<div id="wiki_extentions_header">[\s\S]+?\n</div>\n\n"#)
            .expect("wiki extensions header regex")
    })
}

fn extensions_footer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\n\n<div id="wiki_extentions_footer">[\s\S]+?\n</div>$"#)
            .expect("wiki extensions footer regex")
    })
}

/// Drops the trailing run of `{{fnlist}}` markers the wiki extensions plugin appends.
pub fn remove_trailing_fnlist(text: &str) -> Cow<'_, str> {
    fnlist_regex().replace(text, NoExpand(""))
}

/// Drops the header/footer blocks the wiki extensions plugin injects into page text.
pub fn remove_extension_wrappers(text: &str) -> Cow<'_, str> {
    let without_header = extensions_header_regex().replace_all(text, NoExpand(""));
    let footer = extensions_footer_regex();
    if !footer.is_match(&without_header) {
        return without_header;
    }
    Cow::Owned(footer.replace(&without_header, NoExpand("")).into_owned())
}

/// Both structural cleanups, wrappers first so a footer cannot hide a trailing marker.
///
/// Idempotent.
pub fn cleanup(text: &str) -> String {
    remove_trailing_fnlist(&remove_extension_wrappers(text)).into_owned()
}

fn rewrite_and_clean(text: &str, tag: &str, resource: &str) -> String {
    cleanup(&rewrite_macro(text, tag, resource, &MacroOptions::Keep))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePatch {
    pub notes: String,
    pub private_notes: bool,
}

/// The patched text of a host document, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPatch {
    WikiPage {
        text: String,
        macro_found: bool,
    },
    Issue {
        description: String,
        note: Option<NotePatch>,
        macro_found: bool,
    },
}

impl DocumentPatch {
    /// `false` when no macro referenced the resource; the text is then only cleaned up.
    pub fn macro_found(&self) -> bool {
        match self {
            Self::WikiPage { macro_found, .. } | Self::Issue { macro_found, .. } => *macro_found,
        }
    }

    pub fn into_update_body(self, comments: String) -> UpdateBody {
        match self {
            Self::WikiPage { text, .. } => UpdateBody::WikiPage { text, comments },
            Self::Issue {
                description, note, ..
            } => {
                let (notes, private_notes) = match note {
                    Some(note) => (Some(note.notes), note.private_notes),
                    None => (None, false),
                };
                UpdateBody::Issue {
                    description,
                    notes,
                    private_notes,
                }
            }
        }
    }
}

/// Computes the update for `document` after `resource` was stored.
///
/// Issue descriptions are always rewritten. When `journal_notes` is set and the newest journal
/// referencing the resource is found, its rewritten notes become a new issue note.
pub fn patch_document(
    document: &HostDocument,
    tag: &str,
    resource: &str,
    journal_notes: bool,
) -> DocumentPatch {
    match document {
        HostDocument::WikiPage(page) => DocumentPatch::WikiPage {
            text: rewrite_and_clean(&page.text, tag, resource),
            macro_found: locate_macro(&page.text, tag, resource).is_some(),
        },
        HostDocument::Issue(issue) => {
            let description = rewrite_and_clean(issue.description(), tag, resource);
            let in_description = locate_macro(issue.description(), tag, resource).is_some();

            let note = match resolve_target(document, tag, resource) {
                Some(PatchTarget::JournalNote(index)) if journal_notes => {
                    issue.journals.get(index).map(|journal| NotePatch {
                        notes: rewrite_and_clean(journal.notes(), tag, resource),
                        private_notes: journal.private_notes,
                    })
                }
                _ => None,
            };

            DocumentPatch::Issue {
                macro_found: in_description || note.is_some(),
                description,
                note,
            }
        }
    }
}

#[cfg(test)]
mod tests;
