// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bare diagram XML rendered client-side by the viewer.
//!
//! The page element is a container whose `data-mxgraph` attribute holds a JSON envelope for the
//! viewer; its `xml` field is the diagram. Nothing is visible until the viewer renders the
//! container again.

use serde_json::Value;

use super::{DiagramNode, FormatError, FormatStrategy, NodeKind, SaveAction};
use crate::model::MimeKind;
use crate::protocol::{OutboundMessage, SaveEvent};

pub const ENVELOPE_ATTRIBUTE: &str = "data-mxgraph";

fn read_envelope(node: &dyn DiagramNode) -> Result<Value, FormatError> {
    let raw = node
        .attribute(ENVELOPE_ATTRIBUTE)
        .ok_or(FormatError::MissingAttribute(ENVELOPE_ATTRIBUTE))?;
    Ok(serde_json::from_str(&raw)?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RawMarkup;

impl FormatStrategy for RawMarkup {
    fn mime_kind(&self) -> MimeKind {
        MimeKind::RawMarkup
    }

    fn extract_initial_payload(&self, node: &dyn DiagramNode) -> Result<String, FormatError> {
        if node.kind() != NodeKind::Container {
            return Err(FormatError::UnsupportedNode(node.kind()));
        }
        read_envelope(node)?
            .get("xml")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(FormatError::MissingXml)
    }

    fn decode_exported_payload(&self, raw: &str) -> Vec<u8> {
        raw.as_bytes().to_vec()
    }

    fn show_loading(&self, node: &mut dyn DiagramNode, loader_url: &str) {
        node.set_inner_markup(&super::loader_markup(loader_url));
    }

    fn hide_loading(&self, node: &mut dyn DiagramNode, _initial: &str) {
        node.set_inner_markup("");
        node.rerender();
    }

    fn apply_local_update(
        &self,
        node: &mut dyn DiagramNode,
        raw: &str,
    ) -> Result<Option<String>, FormatError> {
        let mut envelope = read_envelope(node)?;
        let Some(fields) = envelope.as_object_mut() else {
            return Err(FormatError::MissingXml);
        };
        fields.insert("xml".to_owned(), Value::String(raw.to_owned()));
        node.set_attribute(ENVELOPE_ATTRIBUTE, &serde_json::to_string(&envelope)?);
        Ok(Some(raw.to_owned()))
    }

    fn load_message(&self, initial: &str) -> OutboundMessage {
        OutboundMessage::load_xml(initial)
    }

    fn export_request(&self, save: &SaveEvent, _spin: &str) -> SaveAction {
        match &save.xml {
            Some(xml) => SaveAction::Persist(xml.clone()),
            None => SaveAction::Skip,
        }
    }
}
