// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::*;
use crate::model::{Issue, Journal, MacroRef, WikiPage, ATTACH_TAG};

fn issue(description: &str, notes: &[&str]) -> HostDocument {
    HostDocument::Issue(Issue {
        id: Some(9),
        description: Some(description.to_owned()),
        journals: notes
            .iter()
            .enumerate()
            .map(|(index, notes)| Journal {
                id: Some(index as u64 + 1),
                notes: Some((*notes).to_owned()),
                private_notes: index == 1,
            })
            .collect(),
    })
}

#[rstest]
#[case("{{drawio_attach(diagram.png)}}", "diagram_2.png")]
#[case("{{drawio_attach(diagram.png)}}", "diagram.png")]
#[case("{{drawio_attach(diagram_3.png)}}", "diagram.png")]
#[case("{{drawio_attach(diagram)}}", "diagram_12.png")]
#[case("{{drawio_attach(my file.svg, size=200)}}", "my_file.svg")]
fn locate_tolerates_storage_renames(#[case] text: &str, #[case] resource: &str) {
    let found = locate_macro(text, ATTACH_TAG, resource).expect("macro located");
    assert_eq!(found.range, 0..text.len());
}

#[rstest]
#[case("{{drawio_attach(other.png)}}", "diagram.png")]
#[case("{{drawio_attach(diagram.svg)}}", "diagram.png")]
#[case("{{drawio_dmsf(diagram.png)}}", "diagram.png")]
#[case("{{drawio_attach(xdiagram.png)}}", "diagram.png")]
fn locate_rejects_other_diagrams(#[case] text: &str, #[case] resource: &str) {
    assert_eq!(locate_macro(text, ATTACH_TAG, resource), None);
}

#[test]
fn locate_reports_options_tail() {
    let text = "intro\n{{drawio_attach(flow.svg, size=300)}}\noutro";
    let found = locate_macro(text, ATTACH_TAG, "flow.svg").unwrap();
    assert_eq!(&text[found.range.clone()], "{{drawio_attach(flow.svg, size=300)}}");
    assert_eq!(found.options.as_deref(), Some(", size=300"));
    assert_eq!(
        found.reference,
        Some(MacroRef::new(ATTACH_TAG, "flow.svg").with_option("size", "300"))
    );
}

#[test]
fn rewrite_is_a_no_op_without_a_match() {
    let text = "no diagrams here {{toc}}";
    let rewritten = rewrite_macro(text, ATTACH_TAG, "missing.png", &MacroOptions::Keep);
    assert!(matches!(rewritten, Cow::Borrowed(_)));
    assert_eq!(rewritten, text);
}

#[test]
fn rewrite_renames_and_keeps_options() {
    let text = "a {{drawio_attach(diagram.png,size=100)}} b";
    let rewritten = rewrite_macro(text, ATTACH_TAG, "diagram_2.png", &MacroOptions::Keep);
    assert_eq!(rewritten, "a {{drawio_attach(diagram_2.png,size=100)}} b");
}

#[test]
fn rewrite_replaces_options_when_asked() {
    let text = "{{drawio_attach(diagram.png, size=100)}}";
    let options = MacroOptions::Replace(vec![("size".to_owned(), "250".to_owned())]);
    let rewritten = rewrite_macro(text, ATTACH_TAG, "diagram.png", &options);
    assert_eq!(rewritten, "{{drawio_attach(diagram.png,size=250)}}");
    assert_eq!(
        locate_macro(&rewritten, ATTACH_TAG, "diagram.png").and_then(|found| found.reference),
        Some(MacroRef::new(ATTACH_TAG, "diagram.png").with_option("size", "250"))
    );
}

#[test]
fn rewrite_touches_only_the_first_macro() {
    let text = "{{drawio_attach(d.png)}}\n{{drawio_attach(d.png)}}";
    let rewritten = rewrite_macro(text, ATTACH_TAG, "d_1.png", &MacroOptions::Keep);
    assert_eq!(rewritten, "{{drawio_attach(d_1.png)}}\n{{drawio_attach(d.png)}}");
}

#[rstest]
#[case("See [1]\n\n{{fnlist}}\n", "See [1]")]
#[case("body\n\n{{fnlist}}", "body")]
#[case("body[1]\n\n{{fnlist}}\n\n{{fnlist}}\n", "body[1]")]
#[case("{{fnlist}} first\n\nlast", "{{fnlist}} first\n\nlast")]
fn trailing_fnlist_markers_are_stripped(#[case] text: &str, #[case] expected: &str) {
    let once = cleanup(text);
    assert_eq!(once, expected);
    assert_eq!(cleanup(&once), once);
}

#[test]
fn extension_wrappers_are_removed() {
    let text = "top\n<div id=\"wiki_extentions_header\">\nheader stuff\n</div>\n\nbody\n\n<div id=\"WIKI_EXTENTIONS_FOOTER\">\nfooter\n</div>";
    let cleaned = cleanup(text);
    assert_eq!(cleaned, "topbody");
    assert_eq!(cleanup(&cleaned), cleaned);
}

#[test]
fn footer_is_removed_before_trailing_fnlist() {
    let text = "a\n\n{{fnlist}}\n\nb\n\n{{fnlist}}\n\n<div id=\"wiki_extentions_footer\">\nf\n</div>";
    let cleaned = cleanup(text);
    assert_eq!(cleaned, "a\n\n{{fnlist}}\n\nb");
    assert_eq!(cleanup(&cleaned), cleaned);
}

#[test]
fn wiki_page_patch_rewrites_and_cleans() {
    let document = HostDocument::WikiPage(WikiPage {
        title: "Start".to_owned(),
        text: "{{drawio_attach(flow.svg)}}\n\n{{fnlist}}\n\n{{fnlist}}".to_owned(),
    });

    let patch = patch_document(&document, ATTACH_TAG, "flow_1.svg", true);
    assert_eq!(
        patch,
        DocumentPatch::WikiPage {
            text: "{{drawio_attach(flow_1.svg)}}".to_owned(),
            macro_found: true,
        }
    );
}

#[test]
fn missing_macro_leaves_text_unchanged() {
    let document = HostDocument::WikiPage(WikiPage {
        title: "Start".to_owned(),
        text: "nothing yet".to_owned(),
    });
    let patch = patch_document(&document, ATTACH_TAG, "flow.svg", true);
    assert!(!patch.macro_found());
    assert_eq!(
        patch.into_update_body("c".to_owned()),
        UpdateBody::WikiPage {
            text: "nothing yet".to_owned(),
            comments: "c".to_owned(),
        }
    );
}

#[test]
fn newest_referencing_journal_wins() {
    let document = issue(
        "desc",
        &[
            "{{drawio_attach(a.png)}} first",
            "{{drawio_attach(a.png)}} second",
            "unrelated",
        ],
    );
    assert_eq!(
        resolve_target(&document, ATTACH_TAG, "a.png"),
        Some(PatchTarget::JournalNote(1))
    );

    let patch = patch_document(&document, ATTACH_TAG, "a_1.png", true);
    let DocumentPatch::Issue {
        description, note, ..
    } = patch
    else {
        panic!("expected issue patch");
    };
    assert_eq!(description, "desc");
    assert_eq!(
        note,
        Some(NotePatch {
            notes: "{{drawio_attach(a_1.png)}} second".to_owned(),
            private_notes: true,
        })
    );
}

#[test]
fn description_is_patched_when_no_journal_references() {
    let document = issue("see {{drawio_attach(a.png)}}", &["hello"]);
    assert_eq!(
        resolve_target(&document, ATTACH_TAG, "a.png"),
        Some(PatchTarget::IssueDescription)
    );

    let patch = patch_document(&document, ATTACH_TAG, "a_2.png", true);
    assert!(patch.macro_found());
    assert_eq!(
        patch.into_update_body(String::new()),
        UpdateBody::Issue {
            description: "see {{drawio_attach(a_2.png)}}".to_owned(),
            notes: None,
            private_notes: false,
        }
    );
}

#[test]
fn journal_notes_can_be_disabled() {
    let document = issue("", &["{{drawio_attach(a.png)}}"]);
    let patch = patch_document(&document, ATTACH_TAG, "a.png", false);
    assert_eq!(
        patch,
        DocumentPatch::Issue {
            description: String::new(),
            note: None,
            macro_found: false,
        }
    );
}
