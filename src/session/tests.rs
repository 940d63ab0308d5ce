// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use tokio::sync::mpsc;

use super::host::fake::{FakeHost, FRAME};
use super::*;
use crate::format::fake::FakeNode;
use crate::format::raw::ENVELOPE_ATTRIBUTE;
use crate::format::NodeKind;
use crate::model::StorageKind;
use crate::protocol::FrameId;
use crate::store::{DocumentPath, TransportError, UpdateBody};
use crate::sync::attachments::fake::FakeAttachmentList;
use crate::sync::fake::{attachment, Call, FakeStore};
use crate::sync::{SaveTarget, SyncStep, Synchronizer};

type TestSession = EditSession<FakeNode, FakeHost, Synchronizer<FakeStore, FakeAttachmentList>>;

const OLD_PNG: &str = "data:image/png;base64,T0xE";
const NEW_PNG: &str = "data:image/png;base64,iVBORw0KGgo=";
const LOADER: &str = "https://embed.diagrams.net/images/ajax-loader.gif";

fn message(data: &str) -> HostEvent {
    HostEvent::Message(Envelope::new(FRAME, data))
}

fn save_event(width: u32, height: u32, page: u32) -> HostEvent {
    message(&format!(
        r#"{{"event":"save","xml":"<mxfile/>","bounds":{{"x":0,"y":0,"width":{width},"height":{height}}},"currentPage":{page}}}"#
    ))
}

fn session(name: &str, node: FakeNode, store: FakeStore) -> TestSession {
    let resource = DiagramResource::new(name, StorageKind::Attachment).unwrap();
    let target = SaveTarget::new(DocumentPath::new("/projects/demo/wiki/Start"))
        .with_page_name("Start")
        .with_original_name(name);
    let sync = Synchronizer::new(store, FakeAttachmentList::default(), target);
    EditSession::new(resource, node, FakeHost::new(), sync, &EditorConfig::default())
}

fn png_session(store: FakeStore) -> TestSession {
    session(
        "pic.png",
        FakeNode::new(NodeKind::Image).with_attribute("src", OLD_PNG),
        store,
    )
}

fn started_png_session(store: FakeStore) -> TestSession {
    let mut session = png_session(store);
    session.start().unwrap();
    session
}

#[test]
fn start_opens_and_sizes_the_frame() {
    let session = started_png_session(FakeStore::wiki("Start", ""));

    assert_eq!(session.state(), SessionState::AwaitingInit);
    assert_eq!(session.initial(), OLD_PNG);
    let host = session.host();
    assert!(host.url.as_deref().unwrap().starts_with("https://embed.diagrams.net?embed=1&"));
    assert_eq!(host.geometry, Some((40, 860)));
    assert!(host.locked && host.listening && host.frame_open);
    assert_eq!(session.node().attr("src"), Some(LOADER));
}

#[test]
fn second_start_is_rejected() {
    let mut session = started_png_session(FakeStore::wiki("Start", ""));
    assert!(matches!(session.start(), Err(SessionError::AlreadyStarted)));
}

#[test]
fn unreadable_node_does_not_open_a_frame() {
    let mut session = session(
        "pic.png",
        FakeNode::new(NodeKind::Container),
        FakeStore::wiki("Start", ""),
    );
    assert!(matches!(session.start(), Err(SessionError::Format(_))));
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.host().url.is_none());
}

#[tokio::test]
async fn init_loads_the_initial_payload() {
    let mut session = started_png_session(FakeStore::wiki("Start", ""));

    let dispatch = session.handle(message(r#"{"event":"init"}"#)).await.unwrap();

    assert_eq!(dispatch, Dispatch::Loaded);
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(
        session.host().posted,
        vec![format!(r#"{{"action":"load","xmlpng":"{OLD_PNG}"}}"#)]
    );
}

#[tokio::test]
async fn exit_closes_without_remote_calls() {
    let mut session = started_png_session(FakeStore::wiki("Start", ""));
    session.handle(message(r#"{"event":"init"}"#)).await.unwrap();

    let dispatch = session
        .handle(message(r#"{"event":"exit","modified":true}"#))
        .await
        .unwrap();

    assert_eq!(dispatch, Dispatch::Closed);
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.outcome(), Some(SessionOutcome::Cancelled));
    assert!(session.persister().store().calls().is_empty());
    assert_eq!(session.node().attr("src"), Some(OLD_PNG));
    let host = session.host();
    assert!(!host.frame_open && !host.locked && !host.listening);
    assert!(host.notices.is_empty());
}

#[tokio::test]
async fn exit_before_init_cancels() {
    let mut session = started_png_session(FakeStore::wiki("Start", ""));

    let dispatch = session.handle(message(r#"{"event":"exit"}"#)).await.unwrap();

    assert_eq!(dispatch, Dispatch::Closed);
    assert_eq!(session.outcome(), Some(SessionOutcome::Cancelled));
    assert!(session.host().posted.is_empty());
    assert!(session.persister().store().calls().is_empty());
    assert_eq!(session.node().attr("src"), Some(OLD_PNG));
    assert!(!session.host().frame_open);
}

#[rstest]
#[case(0, 0, 0, Notice::EmptyDiagram)]
#[case(0, 120, 0, Notice::EmptyDiagram)]
#[case(200, 0, 0, Notice::EmptyDiagram)]
#[case(0, 0, 1, Notice::EmptyDiagramPage)]
#[case(0, 80, 3, Notice::EmptyDiagramPage)]
#[tokio::test]
async fn empty_bounds_warn_once_and_keep_editing(
    #[case] width: u32,
    #[case] height: u32,
    #[case] page: u32,
    #[case] expected: Notice,
) {
    let mut session = started_png_session(FakeStore::wiki("Start", ""));
    session.handle(message(r#"{"event":"init"}"#)).await.unwrap();

    let dispatch = session.handle(save_event(width, height, page)).await.unwrap();

    assert_eq!(dispatch, Dispatch::Warned(expected.clone()));
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.host().notices, vec![expected]);
    assert_eq!(session.host().posted.len(), 1);
    assert!(session.persister().store().calls().is_empty());
}

#[tokio::test]
async fn foreign_and_malformed_messages_are_ignored() {
    let mut session = started_png_session(FakeStore::wiki("Start", ""));

    let foreign = HostEvent::Message(Envelope::new(FrameId::new(99), r#"{"event":"init"}"#));
    for event in [
        foreign,
        message(""),
        message("not json"),
        message(r#"{"no_event":true}"#),
        message(r#"{"event":"configure"}"#),
        save_event(100, 100, 0),
    ] {
        assert_eq!(session.handle(event).await.unwrap(), Dispatch::Ignored);
    }

    assert_eq!(session.state(), SessionState::AwaitingInit);
    assert!(session.host().posted.is_empty());
}

#[tokio::test]
async fn resize_refits_the_frame() {
    let mut session = started_png_session(FakeStore::wiki("Start", ""));

    session.host.viewport_height = 600;
    assert_eq!(session.handle(HostEvent::Resize).await.unwrap(), Dispatch::Resized);
    assert_eq!(session.host().geometry, Some((40, 560)));
}

#[tokio::test]
async fn raster_save_keeps_the_exported_image() {
    let store = FakeStore::wiki("Start", "{{drawio_attach(pic.png)}}")
        .with_attachments(vec![attachment(12, "pic.png")]);
    let mut session = started_png_session(store);
    session.handle(message(r#"{"event":"init"}"#)).await.unwrap();

    let dispatch = session.handle(save_event(300, 200, 0)).await.unwrap();
    assert_eq!(dispatch, Dispatch::ExportRequested);
    assert_eq!(session.state(), SessionState::Exporting);
    assert_eq!(
        session.host().posted[1],
        r#"{"action":"export","format":"xmlpng","spin":"Updating page..."}"#
    );

    let exit = session.handle(message(r#"{"event":"exit"}"#)).await.unwrap();
    assert_eq!(exit, Dispatch::Ignored);

    let export = message(&format!(r#"{{"event":"export","format":"xmlpng","data":"{NEW_PNG}"}}"#));
    let Dispatch::Saved(report) = session.handle(export).await.unwrap() else {
        panic!("expected the diagram to be saved");
    };

    assert!(report.macro_found);
    assert_eq!(session.outcome(), Some(SessionOutcome::Saved));
    assert_eq!(session.initial(), NEW_PNG);
    assert_eq!(session.node().attr("src"), Some(NEW_PNG));
    assert_eq!(
        session.persister().store().calls()[0],
        Call::Upload {
            filename: "pic.png".to_owned(),
            size: 8
        }
    );
    assert_eq!(session.persister().list().count, 1);
    assert!(!session.host().frame_open);
}

#[tokio::test]
async fn export_without_prior_save_is_persisted() {
    let store = FakeStore::wiki("Start", "{{drawio_attach(pic.png)}}");
    let mut session = started_png_session(store);
    session.handle(message(r#"{"event":"init"}"#)).await.unwrap();

    let export = message(&format!(r#"{{"event":"export","data":"{NEW_PNG}"}}"#));
    let dispatch = session.handle(export).await.unwrap();

    assert!(matches!(dispatch, Dispatch::Saved(_)));
    assert_eq!(session.outcome(), Some(SessionOutcome::Saved));
    assert_eq!(session.host().posted.len(), 1);
    assert_eq!(
        session.persister().store().calls()[0],
        Call::Upload {
            filename: "pic.png".to_owned(),
            size: 8
        }
    );
    assert_eq!(session.node().attr("src"), Some(NEW_PNG));
}

#[tokio::test]
async fn failed_save_notifies_and_keeps_the_page() {
    let store = FakeStore::wiki("Start", "{{drawio_attach(pic.png)}}").failing_at(
        SyncStep::UpdateDocument,
        TransportError::http(409, Vec::new(), "Conflict"),
    );
    let mut session = started_png_session(store);
    session.handle(message(r#"{"event":"init"}"#)).await.unwrap();
    session.handle(save_event(300, 200, 0)).await.unwrap();

    let export = message(&format!(r#"{{"event":"export","data":"{NEW_PNG}"}}"#));
    let dispatch = session.handle(export).await.unwrap();

    assert_eq!(dispatch, Dispatch::SaveFailed(SaveFailure::Conflict));
    assert_eq!(session.outcome(), Some(SessionOutcome::Failed));
    assert_eq!(
        session.host().notices,
        vec![Notice::SaveFailed(SaveFailure::Conflict)]
    );
    assert_eq!(session.node().attr("src"), Some(OLD_PNG));
    assert!(!session.host().frame_open);
}

#[tokio::test]
async fn raw_markup_round_trip() {
    let node = FakeNode::new(NodeKind::Container)
        .with_attribute(ENVELOPE_ATTRIBUTE, r#"{"xml":"<old/>"}"#);
    let store = FakeStore::wiki("Start", "Intro\n{{drawio_attach(chart.xml)}}\n");
    let mut session = session("chart.xml", node, store);

    let (tx, mut rx) = mpsc::channel(8);
    tx.send(message(r#"{"event":"init"}"#)).await.unwrap();
    tx.send(message(
        r#"{"event":"save","xml":"<new/>","bounds":{"width":100,"height":50},"currentPage":0}"#,
    ))
    .await
    .unwrap();

    let outcome = session.run(&mut rx).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Saved);
    assert_eq!(session.host().posted, vec![r#"{"action":"load","xml":"<old/>"}"#]);
    assert_eq!(session.node().attr(ENVELOPE_ATTRIBUTE), Some(r#"{"xml":"<new/>"}"#));
    assert_eq!(session.node().inner, "");
    assert_eq!(session.node().rerenders, 1);

    let store = session.persister().store();
    assert_eq!(
        store.calls()[0],
        Call::Upload {
            filename: "chart.xml".to_owned(),
            size: "<new/>".len()
        }
    );
    let (_, update) = store.updates().remove(0);
    assert_eq!(
        update.body,
        UpdateBody::WikiPage {
            text: "Intro\n{{drawio_attach(chart.xml)}}\n".to_owned(),
            comments: "chart.xml -> chart.xml".to_owned(),
        }
    );
    assert_eq!(update.attachments[0].content_type, "application/xml");
}

#[tokio::test]
async fn closed_channel_abandons_the_session() {
    let mut session = png_session(FakeStore::wiki("Start", ""));
    let (tx, mut rx) = mpsc::channel::<HostEvent>(1);
    drop(tx);

    let outcome = session.run(&mut rx).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Abandoned);
    assert_eq!(session.node().attr("src"), Some(OLD_PNG));
    assert!(!session.host().frame_open);
}

#[tokio::test]
async fn raw_save_without_xml_stores_nothing() {
    let node = FakeNode::new(NodeKind::Container)
        .with_attribute(ENVELOPE_ATTRIBUTE, r#"{"xml":"<old/>"}"#);
    let mut session = session("chart.xml", node, FakeStore::wiki("Start", ""));
    session.start().unwrap();
    session.handle(message(r#"{"event":"init"}"#)).await.unwrap();

    let dispatch = session
        .handle(message(
            r#"{"event":"save","bounds":{"width":100,"height":50},"currentPage":0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(dispatch, Dispatch::Ignored);
    assert_eq!(session.state(), SessionState::Editing);
    assert!(session.persister().store().calls().is_empty());
    assert_eq!(session.node().attr(ENVELOPE_ATTRIBUTE), Some(r#"{"xml":"<old/>"}"#));
}
