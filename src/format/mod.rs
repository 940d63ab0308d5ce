// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-format encode/decode strategies.
//!
//! Each diagram representation (SVG, PNG, bare XML) needs its own way of extracting the data
//! the editor loads, decoding what the editor exports, and updating the page in place. A
//! session picks one [`FormatStrategy`] up front with [`strategy_for`] and uses only that.

pub mod node;
pub mod raster;
pub mod raw;
pub mod vector;

pub use node::{loader_markup, DiagramNode, NodeKind, LOADER_ID};
pub use raster::RasterMarkup;
pub use raw::RawMarkup;
pub use vector::{make_responsive, repair_svg_text, VectorMarkup};

use crate::model::MimeKind;
use crate::protocol::{OutboundMessage, SaveEvent};

/// What the session does with a non-empty `save` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAction {
    /// Ask the editor to export; persistence continues on its `export` event.
    RequestExport(OutboundMessage),
    /// The payload is already at hand; persist it right away.
    Persist(String),
    /// The event carries no diagram; nothing is stored and the editor stays open.
    Skip,
}

pub trait FormatStrategy {
    fn mime_kind(&self) -> MimeKind;

    fn file_extension(&self) -> &'static str {
        self.mime_kind().extension()
    }

    fn mime_type(&self) -> &'static str {
        self.mime_kind().mime_type()
    }

    /// The data handed to the editor's `load` command.
    fn extract_initial_payload(&self, node: &dyn DiagramNode) -> Result<String, FormatError>;

    /// Turns the editor's exported payload into the bytes to store.
    fn decode_exported_payload(&self, raw: &str) -> Vec<u8>;

    fn show_loading(&self, node: &mut dyn DiagramNode, loader_url: &str);

    /// Restores the page after editing, showing `initial`.
    fn hide_loading(&self, node: &mut dyn DiagramNode, initial: &str);

    /// Shows the exported diagram on the page without a reload.
    ///
    /// Returns a replacement for the session's initial snapshot when the update must survive
    /// the teardown that follows.
    fn apply_local_update(
        &self,
        node: &mut dyn DiagramNode,
        raw: &str,
    ) -> Result<Option<String>, FormatError>;

    fn load_message(&self, initial: &str) -> OutboundMessage;

    fn export_request(&self, save: &SaveEvent, spin: &str) -> SaveAction;
}

pub fn strategy_for(mime_kind: MimeKind) -> Box<dyn FormatStrategy> {
    match mime_kind {
        MimeKind::VectorMarkup => Box::new(VectorMarkup),
        MimeKind::RasterMarkup => Box::new(RasterMarkup),
        MimeKind::RawMarkup => Box::new(RawMarkup),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("diagram element has no `{0}` attribute")]
    MissingAttribute(&'static str),
    #[error("a {0:?} element cannot hold this diagram format")]
    UnsupportedNode(NodeKind),
    #[error("invalid `data-mxgraph` envelope: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("`data-mxgraph` envelope has no `xml` string")]
    MissingXml,
}
