// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Incremental refresh of the attachment table shown under the document.
//!
//! Row markup contains localized text we cannot produce ourselves, so a new row is made by
//! cloning the last existing row and substituting the new attachment's details.

use std::sync::OnceLock;

use regex::{Captures, NoExpand, Regex};

use crate::model::AttachmentRecord;

/// Used when the table has no row to clone yet.
pub const TEMPLATE_ROW: &str = concat!(
    r#"<td>"#,
    r#"    <a class="icon icon-attachment" href="/attachments/00">NAME</a>    <span class="size">(SIZE KB)</span>"#,
    r#"    <a class="icon-only icon-download" title="Download" href="/attachments/download/00/NAME">NAME</a>  </td>"#,
    r#"  <td></td>"#,
    r#"  <td>"#,
    r#"      <span class="author">USER, TIMESTAMP</span>"#,
    r#"  </td>"#,
    r#"  <td>"#,
    r#"      <a data-confirm="Are you sure ?" class="delete icon-only icon-del" title="Delete" rel="nofollow" data-method="delete" href="/attachments/00">Delete</a>"#,
    r#"  </td>"#,
);

/// The on-page attachment table. Implemented by the embedding host.
pub trait AttachmentList {
    /// Inner markup of the last row, if the table has any.
    fn last_row(&self) -> Option<String>;

    fn append_row(&mut self, markup: &str);

    /// Bumps the attachment count shown in the table legend.
    fn increment_count(&mut self);
}

/// A page without an attachment table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttachmentList;

impl AttachmentList for NoAttachmentList {
    fn last_row(&self) -> Option<String> {
        None
    }

    fn append_row(&mut self, _markup: &str) {}

    fn increment_count(&mut self) {}
}

fn href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"href="[^"]+""#).expect("href regex"))
}

fn size_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?) KB\)").expect("size regex"))
}

fn link_text_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r">[^<]+</a>").expect("link text regex"))
}

fn author_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"author">[^<]+"#).expect("author regex"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Produces the markup of a row for `record` from the markup of an existing row.
///
/// The first and third links point at the attachment page, the second at the download URL;
/// the first two link texts become the file name.
pub fn render_row(template: &str, record: &AttachmentRecord) -> String {
    let attachment_url = format!("{}/{}", record.attachments_base(), record.id);
    let download_url = escape_html(&record.content_url);
    let filename = escape_html(&record.filename);

    let mut hrefs = 0;
    let row = href_regex().replace_all(template, |caps: &Captures<'_>| {
        let replaced = match hrefs {
            0 | 2 => format!(r#"href="{attachment_url}""#),
            1 => format!(r#"href="{download_url}""#),
            _ => caps[0].to_owned(),
        };
        hrefs += 1;
        replaced
    });

    let size = format!("({} KB)", record.size_label());
    let row = size_regex().replace(&row, NoExpand(&size));

    let mut links = 0;
    let row = link_text_regex().replace_all(&row, |caps: &Captures<'_>| {
        links += 1;
        if links <= 2 {
            format!(">{filename}</a>")
        } else {
            caps[0].to_owned()
        }
    });

    let author = format!(
        r#"author">{}, {}"#,
        escape_html(&record.author.name),
        record.created_label()
    );
    author_regex().replace(&row, NoExpand(&author)).into_owned()
}

/// Appends a row for `record` to `list`, cloning its last row or the template.
pub fn append_record(list: &mut dyn AttachmentList, record: &AttachmentRecord) {
    let template = list.last_row().unwrap_or_else(|| TEMPLATE_ROW.to_owned());
    list.append_row(&render_row(&template, record));
    list.increment_count();
}

#[cfg(test)]
pub(crate) mod fake {
    use super::AttachmentList;

    #[derive(Debug, Clone, Default)]
    pub(crate) struct FakeAttachmentList {
        pub rows: Vec<String>,
        pub count: usize,
    }

    impl AttachmentList for FakeAttachmentList {
        fn last_row(&self) -> Option<String> {
            self.rows.last().cloned()
        }

        fn append_row(&mut self, markup: &str) {
            self.rows.push(markup.to_owned());
        }

        fn increment_count(&mut self) {
            self.count += 1;
        }
    }
}
