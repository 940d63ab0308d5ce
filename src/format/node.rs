// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Shape of the page element that shows the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An `<svg>` element inlined in the page.
    InlineSvg,
    /// An `<img>` element whose `src` holds the picture.
    Image,
    /// A `<div>` the viewer renders into, configured through `data-mxgraph`.
    Container,
}

/// The page element a diagram is displayed in.
///
/// Implemented by the embedding host; the format strategies only read and write it through
/// these operations.
pub trait DiagramNode {
    fn kind(&self) -> NodeKind;

    /// The element serialized as markup, itself included.
    fn outer_markup(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&mut self, name: &str, value: &str);

    fn set_inner_markup(&mut self, markup: &str);

    /// Replaces everything inside the element's parent.
    fn replace_parent_content(&mut self, markup: &str);

    fn set_visible(&mut self, visible: bool);

    /// Inserts `markup` as the first child of the element's parent.
    fn prepend_to_parent(&mut self, markup: &str);

    /// Removes the element with the given id from the page, if present.
    fn remove_by_id(&mut self, id: &str);

    /// Asks the diagram viewer to render the element again.
    fn rerender(&mut self);
}

pub const LOADER_ID: &str = "drawioLoader";

pub fn loader_markup(loader_url: &str) -> String {
    format!(r#"<img id="{LOADER_ID}" src="{loader_url}"/>"#)
}
