// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! SVG diagrams with the model embedded in the `content` attribute.

use std::sync::OnceLock;

use regex::Regex;

use super::{DiagramNode, FormatError, FormatStrategy, NodeKind, SaveAction};
use crate::codec;
use crate::model::MimeKind;
use crate::protocol::{ExportFormat, OutboundMessage, SaveEvent};

/// Left behind by the browser serializer when an inline SVG is saved and re-edited without a
/// page reload.
const SERIALIZER_ARTIFACT: &str = r#""="""#;
const RESPONSIVE_STYLE: &str = "max-width:100%";

fn open_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<svg\b([^>]*)>").expect("svg open tag regex"))
}

fn width_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\swidth="(\d+(?:\.\d+)?)(?:px)?""#).expect("width regex"))
}

fn height_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\sheight="(\d+(?:\.\d+)?)(?:px)?""#).expect("height regex"))
}

fn view_box_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\sviewBox="([^"]*)""#).expect("viewBox regex"))
}

fn style_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\sstyle="([^"]*)""#).expect("style regex"))
}

fn sizing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\s(?:width|height|viewBox|style|preserveAspectRatio)="[^"]*""#)
            .expect("sizing attribute regex")
    })
}

/// Fixes the known defects of SVG text coming back from the editor.
///
/// Removes the serializer artifact, trims up to two trailing NULs added by the base64 round trip
/// and completes a closing tag truncated to `</sv` or `</svg`. Well-formed text is unchanged.
pub fn repair_svg_text(text: &str) -> String {
    let mut text = text.replacen(SERIALIZER_ARTIFACT, "", 1);

    for _ in 0..2 {
        if text.ends_with('\0') {
            text.pop();
        }
    }

    if text.ends_with("</sv") {
        text.push_str("g>");
    } else if text.ends_with("</svg") {
        text.push('>');
    }

    text
}

/// Rewrites the fixed pixel size of the root `<svg>` into a responsive one.
///
/// The picture keeps its aspect ratio and never grows past its container. Markup without a pixel
/// size, or already rewritten, is returned unchanged.
pub fn make_responsive(svg: &str) -> String {
    let Some(caps) = open_tag_regex().captures(svg) else {
        return svg.to_owned();
    };
    let (Some(tag), Some(attrs)) = (caps.get(0), caps.get(1)) else {
        return svg.to_owned();
    };
    let attrs = attrs.as_str();

    if attrs.contains(RESPONSIVE_STYLE) {
        return svg.to_owned();
    }

    let width = width_regex().captures(attrs).and_then(|c| c.get(1));
    let height = height_regex().captures(attrs).and_then(|c| c.get(1));
    let (Some(width), Some(height)) = (width, height) else {
        return svg.to_owned();
    };
    let (width, height) = (width.as_str(), height.as_str());

    let view_box = view_box_regex()
        .captures(attrs)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(|| format!("0 0 {width} {height}"));

    let style = match style_regex().captures(attrs).and_then(|c| c.get(1)) {
        Some(existing) if !existing.as_str().trim().is_empty() => {
            format!("{RESPONSIVE_STYLE};{}", existing.as_str().trim())
        }
        _ => RESPONSIVE_STYLE.to_owned(),
    };

    let rest = sizing_regex().replace_all(attrs, "");

    let mut out = String::with_capacity(svg.len() + 64);
    out.push_str(&svg[..tag.start()]);
    out.push_str(&format!(
        r#"<svg preserveAspectRatio="xMaxYMax meet" style="{style}" width="{width}px" height="{height}px" viewBox="{view_box}"{rest}>"#
    ));
    out.push_str(&svg[tag.end()..]);
    out
}

fn decode_svg_text(raw: &str) -> String {
    let bytes = codec::decode_to_bytes(codec::data_url_payload(raw));
    make_responsive(&repair_svg_text(&codec::decode_bytes_to_utf8_text(&bytes)))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VectorMarkup;

impl FormatStrategy for VectorMarkup {
    fn mime_kind(&self) -> MimeKind {
        MimeKind::VectorMarkup
    }

    fn extract_initial_payload(&self, node: &dyn DiagramNode) -> Result<String, FormatError> {
        match node.kind() {
            NodeKind::InlineSvg => Ok(node.outer_markup().replacen(SERIALIZER_ARTIFACT, "", 1)),
            NodeKind::Image => {
                let src = node.attribute("src").ok_or(FormatError::MissingAttribute("src"))?;
                let bytes = codec::decode_to_bytes(codec::data_url_payload(&src));
                Ok(codec::decode_bytes_to_utf8_text(&bytes))
            }
            kind @ NodeKind::Container => Err(FormatError::UnsupportedNode(kind)),
        }
    }

    fn decode_exported_payload(&self, raw: &str) -> Vec<u8> {
        decode_svg_text(raw).into_bytes()
    }

    fn show_loading(&self, node: &mut dyn DiagramNode, loader_url: &str) {
        node.set_visible(false);
        node.prepend_to_parent(&super::loader_markup(loader_url));
    }

    fn hide_loading(&self, node: &mut dyn DiagramNode, _initial: &str) {
        node.remove_by_id(super::LOADER_ID);
        node.set_visible(true);
    }

    fn apply_local_update(
        &self,
        node: &mut dyn DiagramNode,
        raw: &str,
    ) -> Result<Option<String>, FormatError> {
        let svg = decode_svg_text(raw);
        match node.kind() {
            NodeKind::InlineSvg => node.replace_parent_content(&svg),
            NodeKind::Image => {
                node.set_attribute("src", &codec::to_data_url(self.mime_type(), svg.as_bytes()))
            }
            kind @ NodeKind::Container => return Err(FormatError::UnsupportedNode(kind)),
        }
        Ok(None)
    }

    fn load_message(&self, initial: &str) -> OutboundMessage {
        OutboundMessage::load_xml(initial)
    }

    fn export_request(&self, _save: &SaveEvent, spin: &str) -> SaveAction {
        SaveAction::RequestExport(OutboundMessage::export(ExportFormat::XmlSvg, spin))
    }
}
