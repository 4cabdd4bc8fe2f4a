//! Integration tests for a recorder attached to a store's dispatch
//!
//! Tests the flow: Store::dispatch -> interception wrapper -> history -> waiters

use std::time::Duration;

use futures::FutureExt;
use proptest::prelude::*;
use serde_json::{json, Value};
use snoop::store::{AnyAction, Store};
use snoop::Recorder;

use super::common::fixtures::{foo_bar_store, seen_log, test_action, TEST_ACTION};

fn setup() -> (Store<Value, AnyAction>, Recorder<Value, AnyAction>) {
    let store = foo_bar_store();
    let recorder = Recorder::with_store(&store);
    (store, recorder)
}

#[test]
fn test_logs_actions() {
    let (store, recorder) = setup();
    store.dispatch(test_action());

    let history = recorder.history();
    assert_eq!(history[0].action, test_action());
}

#[test]
fn test_logs_state_after_each_action() {
    let (store, recorder) = setup();
    store.dispatch(AnyAction::new("x"));

    let history = recorder.history();
    assert_eq!(history[0].action, AnyAction::new("x"));
    assert_eq!(history[0].state, json!({ "foo": "bar" }));
}

#[test]
fn test_history_keeps_dispatch_order() {
    let store = Store::new(seen_log, json!({}));
    let recorder = Recorder::with_store(&store);
    for kind in ["a", "b", "a", "c"] {
        store.dispatch(AnyAction::new(kind));
    }

    let types: Vec<_> = recorder
        .history()
        .iter()
        .map(|r| r.action_type().unwrap_or_default().to_string())
        .collect();
    assert_eq!(types, vec!["a", "b", "a", "c"]);
}

#[test]
fn test_snapshots_are_independent_of_later_state() {
    let store = Store::new(seen_log, json!({}));
    let recorder = Recorder::with_store(&store);
    store.dispatch(AnyAction::new("first"));
    store.dispatch(AnyAction::new("second"));

    let history = recorder.history();
    assert_eq!(history[0].state, json!({ "seen": ["first"] }));
    assert_eq!(history[1].state, json!({ "seen": ["first", "second"] }));

    let mut live = store.get_state();
    live["seen"] = json!([]);
    assert_eq!(recorder.history()[0].state, json!({ "seen": ["first"] }));
}

#[tokio::test]
async fn test_waits_for_action() {
    let (store, recorder) = setup();

    let dispatcher = store.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        dispatcher.dispatch(test_action());
    });

    let record = recorder.wait_for_action(TEST_ACTION, 0).await.unwrap();
    assert_eq!(record.action, test_action());
}

#[tokio::test]
async fn test_waits_for_multiple_actions_returning_first_dispatched() {
    let (store, recorder) = setup();
    let another = AnyAction::new("another-action");

    let dispatcher = store.clone();
    let first = another.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        dispatcher.dispatch(first);
        dispatcher.dispatch(test_action());
    });

    let record = recorder
        .wait_for_action([TEST_ACTION, "another-action"], 0)
        .await
        .unwrap();
    assert_eq!(record.action, another);
}

#[tokio::test]
async fn test_notifies_when_waiting_after_dispatch() {
    let (store, recorder) = setup();
    store.dispatch(test_action());

    let record = recorder
        .wait_for_action(TEST_ACTION, 0)
        .now_or_never()
        .expect("already in history")
        .unwrap();
    assert_eq!(record.action, test_action());
}

#[tokio::test]
async fn test_skips_matches_before_notification_async() {
    let (store, recorder) = setup();
    let second = test_action().with("check", "out");

    let dispatcher = store.clone();
    let later = second.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(4)).await;
        dispatcher.dispatch(test_action());
        tokio::time::sleep(Duration::from_millis(1)).await;
        dispatcher.dispatch(later);
    });

    let record = recorder.wait_for_action(TEST_ACTION, 1).await.unwrap();
    assert_eq!(record.action, second);
}

#[tokio::test]
async fn test_skips_matches_before_notification_sync() {
    let (store, recorder) = setup();
    let second = test_action().with("number", "second");
    let third = test_action().with("number", "third");
    store.dispatch(test_action());
    store.dispatch(second.clone());
    store.dispatch(third);

    let record = recorder.wait_for_action(TEST_ACTION, 1).await.unwrap();
    assert_eq!(record.action, second);
}

#[tokio::test]
async fn test_wait_has_no_builtin_timeout() {
    let (store, recorder) = setup();
    store.dispatch(AnyAction::new("unrelated"));

    let result = tokio::time::timeout(
        Duration::from_millis(20),
        recorder.wait_for_action("never-dispatched", 0),
    )
    .await;
    assert!(result.is_err(), "wait should still be pending");
}

#[test]
fn test_detach_stops_recording() {
    let (store, recorder) = setup();
    store.dispatch(test_action());
    store.dispatch(test_action());
    recorder.detach().unwrap();
    store.dispatch(test_action());

    assert_eq!(recorder.history().len(), 2);
}

#[test]
fn test_detach_restores_original_dispatch_behaviour() {
    let (store, recorder) = setup();
    recorder.detach().unwrap();

    let returned = store.dispatch(AnyAction::new("after").with("n", 1));
    assert_eq!(returned, AnyAction::new("after").with("n", 1));
    assert_eq!(store.get_state(), json!({ "foo": "bar" }));
    assert!(recorder.store().is_none());
}

#[test]
fn test_reset_clears_log() {
    let (store, recorder) = setup();
    store.dispatch(test_action());
    store.dispatch(test_action());
    recorder.reset();
    assert!(recorder.is_empty());

    store.dispatch(test_action());
    assert_eq!(recorder.history().len(), 1);
}

#[test]
fn test_store_returns_the_store() {
    let (store, recorder) = setup();
    let attached = recorder.store().expect("attached store");
    assert!(attached.ptr_eq(&store));
}

#[test]
fn test_replace_reducer_is_not_recorded() {
    let (store, recorder) = setup();
    store.replace_reducer(std::sync::Arc::new(seen_log));
    store.dispatch(AnyAction::new("after-replace"));

    let history = recorder.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action_type(), Some("after-replace"));
}

fn action_kind() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("@@redux/REPLACEx.y".to_string()),
        "[a-z]{1,6}",
    ]
}

proptest! {
    #[test]
    fn prop_history_matches_dispatch_order(kinds in prop::collection::vec(action_kind(), 0..24)) {
        let store = Store::new(seen_log, json!({}));
        let recorder = Recorder::with_store(&store);
        for kind in &kinds {
            store.dispatch(AnyAction::new(kind.clone()));
        }

        let expected: Vec<&str> = kinds
            .iter()
            .map(String::as_str)
            .filter(|kind| !kind.starts_with("@@redux/REPLACE"))
            .collect();
        let history = recorder.history();
        let recorded: Vec<&str> = history
            .iter()
            .filter_map(|record| record.action_type())
            .collect();
        prop_assert_eq!(recorded, expected);
    }
}
