// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PNG diagrams with the model embedded in a text chunk.

use super::{DiagramNode, FormatError, FormatStrategy, NodeKind, SaveAction};
use crate::codec;
use crate::model::MimeKind;
use crate::protocol::{ExportFormat, OutboundMessage, SaveEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct RasterMarkup;

impl FormatStrategy for RasterMarkup {
    fn mime_kind(&self) -> MimeKind {
        MimeKind::RasterMarkup
    }

    fn extract_initial_payload(&self, node: &dyn DiagramNode) -> Result<String, FormatError> {
        match node.kind() {
            NodeKind::Image => node.attribute("src").ok_or(FormatError::MissingAttribute("src")),
            kind => Err(FormatError::UnsupportedNode(kind)),
        }
    }

    fn decode_exported_payload(&self, raw: &str) -> Vec<u8> {
        codec::decode_to_bytes(codec::data_url_payload(raw))
    }

    fn show_loading(&self, node: &mut dyn DiagramNode, loader_url: &str) {
        node.set_attribute("src", loader_url);
    }

    fn hide_loading(&self, node: &mut dyn DiagramNode, initial: &str) {
        node.set_attribute("src", initial);
    }

    /// The exported data URL becomes the new snapshot, so the teardown after a save shows it
    /// instead of reverting to the pre-edit image.
    fn apply_local_update(
        &self,
        node: &mut dyn DiagramNode,
        raw: &str,
    ) -> Result<Option<String>, FormatError> {
        node.set_attribute("src", raw);
        Ok(Some(raw.to_owned()))
    }

    fn load_message(&self, initial: &str) -> OutboundMessage {
        OutboundMessage::load_png(initial)
    }

    fn export_request(&self, _save: &SaveEvent, spin: &str) -> SaveAction {
        SaveAction::RequestExport(OutboundMessage::export(ExportFormat::XmlPng, spin))
    }
}
