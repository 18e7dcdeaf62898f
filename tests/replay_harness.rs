#![allow(unused)]
//! ViewLast (replay) integration harness.
//!
//! # What this covers
//!
//! - **No history**: a state with no recorded window refuses to replay and
//!   sends nothing.
//! - **Exact window**: the stored `lastStart`/`lastEnd` are sent as
//!   `sin`/`unt` unchanged, with follow off.
//! - **No persistence**: replaying never rewrites the state file.
//!
//! # Running
//!
//! ```sh
//! cargo test --test replay_harness
//! ```

mod common;
use common::*;

use chrono::Utc;
use glog::{view_last, ClientState, Error, Highlight, HttpTransport, Presenter, StateFile, TimeResolver, ViewOptions};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn replay_without_history_fails() {
    let server = FakeLogServer::start().await.unwrap();
    let transport = HttpTransport::new(&server.base_url(), false).unwrap();
    let mut out = Vec::new();
    let presenter = Presenter::with_timezone(&mut out, Highlight::Plain, false, Utc);

    let err = view_last(
        transport,
        presenter,
        &configured_state(&server.base_url()),
        &ViewOptions::default(),
        &TimeResolver::at(Utc::now()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::NoHistory));
    assert!(server.requests().await.is_empty());
}

#[tokio::test]
async fn replay_sends_stored_window_and_persists_nothing() {
    let server = FakeLogServer::start().await.unwrap();
    server
        .reply_json(response_json(
            9_999,
            vec![SyslogBuilder::new(15, "replayed").tag("cron").pid(77).build()],
            vec![],
        ))
        .await;
    let dir = tempfile::tempdir().unwrap();
    let store = StateFile::at(dir.path().join("config.json"));
    let state = ClientState {
        last_view: 500,
        last_start: 10,
        last_end: 20,
        ..configured_state(&server.base_url())
    };
    store.save(&state).unwrap();

    let transport = HttpTransport::new(&state.host, false).unwrap();
    let mut out = Vec::new();
    let presenter = Presenter::with_timezone(&mut out, Highlight::Plain, false, Utc);
    view_last(
        transport,
        presenter,
        &state,
        &ViewOptions::default(),
        &TimeResolver::at(Utc::now()),
    )
    .await
    .unwrap();

    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    assert_request_field!(requests[0], "sin", 10);
    assert_request_field!(requests[0], "unt", 20);
    assert_request_field!(requests[0], "foll", false);

    let text = String::from_utf8(out).unwrap();
    assert_line_count!(text, "cron(77) replayed", 1);
    assert_eq!(store.load().unwrap(), state);
}
