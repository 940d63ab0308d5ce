// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::notice::Notice;
use crate::protocol::FrameId;

/// The page hosting the editor frame.
///
/// Message and resize notifications flow the other way, as [`super::HostEvent`]s the host
/// feeds into the session's channel once listeners are attached.
pub trait HostPage {
    /// Creates the editor frame pointed at `url` and returns the identity of its window.
    fn open_frame(&mut self, url: &str) -> FrameId;

    fn post_to_frame(&mut self, frame: FrameId, message: &str);

    fn remove_frame(&mut self, frame: FrameId);

    fn top_menu_height(&self) -> u32;

    fn viewport_height(&self) -> u32;

    fn set_frame_geometry(&mut self, frame: FrameId, top: u32, height: u32);

    /// Pins the page so it does not scroll under the frame.
    fn lock_viewport(&mut self);

    fn unlock_viewport(&mut self);

    fn attach_listeners(&mut self, frame: FrameId);

    fn detach_listeners(&mut self, frame: FrameId);

    fn notify(&mut self, notice: &Notice);
}
