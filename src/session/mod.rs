// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session lifecycle.
//!
//! An [`EditSession`] owns one embedded editor frame from the moment it is opened until the
//! diagram is saved or the user leaves. Every host callback funnels into [`EditSession::handle`],
//! which is the only place state changes:
//!
//! ```text
//! Idle -> AwaitingInit -> Editing -> Exporting -> Closed
//!              |             |                      ^
//!              +-------------+------- exit ---------+
//! ```

mod embed;
pub mod host;

pub use embed::embed_url;
pub use host::HostPage;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::config::EditorConfig;
use crate::format::{strategy_for, DiagramNode, FormatError, FormatStrategy, SaveAction};
use crate::model::DiagramResource;
use crate::notice::Notice;
use crate::protocol::{Envelope, FrameId, InboundMessage, OutboundMessage, SaveEvent};
use crate::sync::{Persist, PersistReport, SaveFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingInit,
    Editing,
    Exporting,
    Closed,
}

/// Notifications the host page delivers to an open session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Message(Envelope),
    Resize,
}

/// What handling one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Foreign, malformed or out-of-state input; nothing changed.
    Ignored,
    Loaded,
    /// The save was refused and the editor stays open.
    Warned(Notice),
    ExportRequested,
    Saved(PersistReport),
    SaveFailed(SaveFailure),
    /// Closed without saving.
    Closed,
    Resized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Saved,
    Cancelled,
    Failed,
    /// The event channel closed while the editor was still open.
    Abandoned,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot read the diagram from the page: {0}")]
    Format(#[from] FormatError),
    #[error("cannot encode editor command: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session was already started")]
    AlreadyStarted,
}

pub struct EditSession<N, H, P> {
    state: SessionState,
    resource: DiagramResource,
    strategy: Box<dyn FormatStrategy>,
    node: N,
    host: H,
    persist: P,
    frame: Option<FrameId>,
    /// What the page shows once the editor is gone; replaced by a save that must survive
    /// the teardown.
    initial: String,
    embed_url: String,
    loader_url: String,
    spin_label: String,
    outcome: Option<SessionOutcome>,
}

impl<N: DiagramNode, H: HostPage, P: Persist> EditSession<N, H, P> {
    pub fn new(
        resource: DiagramResource,
        node: N,
        host: H,
        persist: P,
        config: &EditorConfig,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            strategy: strategy_for(resource.mime_kind()),
            resource,
            node,
            host,
            persist,
            frame: None,
            initial: String::new(),
            embed_url: embed_url(config),
            loader_url: config.loader_url(),
            spin_label: config.updating_page_label.clone(),
            outcome: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn resource(&self) -> &DiagramResource {
        &self.resource
    }

    pub fn initial(&self) -> &str {
        &self.initial
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn persister(&self) -> &P {
        &self.persist
    }

    /// Opens the editor frame over the page.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyStarted);
        }

        self.initial = self.strategy.extract_initial_payload(&self.node)?;
        self.strategy.show_loading(&mut self.node, &self.loader_url);

        let frame = self.host.open_frame(&self.embed_url);
        self.frame = Some(frame);
        self.fit_frame(frame);
        self.host.lock_viewport();
        self.host.attach_listeners(frame);

        self.state = SessionState::AwaitingInit;
        info!(resource = %self.resource, %frame, "editor opened");
        Ok(())
    }

    pub async fn handle(&mut self, event: HostEvent) -> Result<Dispatch, SessionError> {
        let Some(frame) = self.frame else {
            return Ok(Dispatch::Ignored);
        };

        let envelope = match event {
            HostEvent::Resize => {
                self.fit_frame(frame);
                return Ok(Dispatch::Resized);
            }
            HostEvent::Message(envelope) => envelope,
        };

        let Some(message) = envelope.authenticate(frame) else {
            trace!(source = %envelope.source, "dropping message");
            return Ok(Dispatch::Ignored);
        };

        match (self.state, message) {
            (SessionState::AwaitingInit, InboundMessage::Init) => {
                let load = self.strategy.load_message(&self.initial);
                self.post(frame, &load)?;
                self.state = SessionState::Editing;
                debug!(resource = %self.resource, "diagram loaded into editor");
                Ok(Dispatch::Loaded)
            }
            (SessionState::Editing, InboundMessage::Save(save)) => self.on_save(frame, save).await,
            (SessionState::Editing | SessionState::Exporting, InboundMessage::Export(export)) => {
                self.state = SessionState::Exporting;
                Ok(self.complete_save(&export.data).await)
            }
            (SessionState::AwaitingInit | SessionState::Editing, InboundMessage::Exit(_)) => {
                debug!(resource = %self.resource, "editor closed without saving");
                self.finish(SessionOutcome::Cancelled);
                Ok(Dispatch::Closed)
            }
            (state, message) => {
                trace!(?state, ?message, "event ignored in this state");
                Ok(Dispatch::Ignored)
            }
        }
    }

    /// Starts the session if needed and feeds it events until it closes.
    pub async fn run(
        &mut self,
        events: &mut mpsc::Receiver<HostEvent>,
    ) -> Result<SessionOutcome, SessionError> {
        if self.state == SessionState::Idle {
            self.start()?;
        }

        while self.state != SessionState::Closed {
            let Some(event) = events.recv().await else {
                warn!(resource = %self.resource, "host event channel closed with the editor open");
                self.finish(SessionOutcome::Abandoned);
                break;
            };
            if let Err(err) = self.handle(event).await {
                self.finish(SessionOutcome::Failed);
                return Err(err);
            }
        }

        Ok(self.outcome.unwrap_or(SessionOutcome::Abandoned))
    }

    async fn on_save(&mut self, frame: FrameId, save: SaveEvent) -> Result<Dispatch, SessionError> {
        if save.bounds.is_empty() {
            let notice = if save.current_page > 0 {
                Notice::EmptyDiagramPage
            } else {
                Notice::EmptyDiagram
            };
            debug!(page = save.current_page, "refusing to save an empty diagram");
            self.host.notify(&notice);
            return Ok(Dispatch::Warned(notice));
        }

        match self.strategy.export_request(&save, &self.spin_label) {
            SaveAction::RequestExport(request) => {
                self.post(frame, &request)?;
                self.state = SessionState::Exporting;
                Ok(Dispatch::ExportRequested)
            }
            SaveAction::Persist(raw) => {
                self.state = SessionState::Exporting;
                Ok(self.complete_save(&raw).await)
            }
            SaveAction::Skip => {
                warn!(resource = %self.resource, "save event without a diagram ignored");
                Ok(Dispatch::Ignored)
            }
        }
    }

    async fn complete_save(&mut self, raw: &str) -> Dispatch {
        let bytes = self.strategy.decode_exported_payload(raw);

        match self.persist.persist(&self.resource, bytes).await {
            Ok(report) => {
                match self.strategy.apply_local_update(&mut self.node, raw) {
                    Ok(Some(snapshot)) => self.initial = snapshot,
                    Ok(None) => {}
                    Err(err) => {
                        warn!(resource = %self.resource, error = %err, "saved diagram not shown on the page");
                    }
                }
                info!(resource = %self.resource, macro_found = report.macro_found, "diagram saved");
                self.finish(SessionOutcome::Saved);
                Dispatch::Saved(report)
            }
            Err(err) => {
                let failure = err.failure(self.resource.storage_kind());
                warn!(resource = %self.resource, error = %err, "diagram save failed");
                self.host.notify(&Notice::SaveFailed(failure.clone()));
                self.finish(SessionOutcome::Failed);
                Dispatch::SaveFailed(failure)
            }
        }
    }

    fn post(&mut self, frame: FrameId, message: &OutboundMessage) -> Result<(), SessionError> {
        let json = message.to_json()?;
        self.host.post_to_frame(frame, &json);
        Ok(())
    }

    fn fit_frame(&mut self, frame: FrameId) {
        let top = self.host.top_menu_height();
        let height = self.host.viewport_height().saturating_sub(top);
        self.host.set_frame_geometry(frame, top, height);
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.teardown();
        self.outcome = Some(outcome);
    }

    /// Removes the editor and restores the page. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.strategy.hide_loading(&mut self.node, &self.initial);
            self.host.detach_listeners(frame);
            self.host.remove_frame(frame);
            self.host.unlock_viewport();
        }
        self.state = SessionState::Closed;
    }
}

#[cfg(test)]
mod tests;
