//! Submission policy and late-result handling of the search session

use async_trait::async_trait;
use evalboard_client::{MockResponse, MockSearchClient};
use evalboard_core::config::Config;
use evalboard_core::error::Result;
use evalboard_core::{MetricChoice, ResultSet, SearchClient, SearchQuery};
use evalboard_dashboard::{SearchSession, ViewState};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Client whose responses are held back until the test releases them
///
/// Responses are keyed by the query's `number` field so the pairing does not
/// depend on task scheduling.
#[derive(Default)]
struct GatedClient {
    pending: Mutex<HashMap<String, (oneshot::Receiver<()>, ResultSet)>>,
}

impl GatedClient {
    fn hold(&self, number: &str, body: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        let results = ResultSet::from_json_str(body).expect("valid fixture");
        self.pending
            .lock()
            .expect("lock")
            .insert(number.to_string(), (rx, results));
        tx
    }
}

#[async_trait]
impl SearchClient for GatedClient {
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet> {
        let key = query.get("number").unwrap_or_default().to_string();
        let entry = self.pending.lock().expect("lock").remove(&key);
        match entry {
            Some((gate, results)) => {
                let _ = gate.await;
                Ok(results)
            }
            None => Ok(ResultSet::default()),
        }
    }
}

fn loaded_ids(state: &ViewState) -> Vec<String> {
    match state {
        ViewState::Loaded(table) => table
            .rows()
            .iter()
            .map(|row| row.model_id.to_string())
            .collect(),
        other => panic!("expected loaded table, got {other:?}"),
    }
}

#[tokio::test]
async fn test_new_submission_supersedes_pending_one() {
    let client = Arc::new(GatedClient::default());
    let release_first = client.hold("1", r#"{"results": [{"model_id": 1}]}"#);
    let release_second = client.hold("2", r#"{"results": [{"model_id": 2}]}"#);
    let mut session = SearchSession::new(&Config::default(), client.clone()).expect("session");

    session.form_mut().set_result_limit("1");
    let first = session.submit().expect("first submit");
    session.form_mut().set_result_limit("2");
    let second = session.submit().expect("second submit");

    assert!(second > first);
    assert_eq!(session.view(), &ViewState::Loading);

    let _ = release_second.send(());
    let state = session.next_completion().await.expect("pending search");
    assert_eq!(loaded_ids(state), vec!["2"]);

    // The superseded task was aborted; releasing its gate changes nothing
    let _ = release_first.send(());
    tokio::task::yield_now().await;
    assert!(!session.is_pending());
    assert!(session.next_completion().await.is_none());
    assert_eq!(loaded_ids(session.view()), vec!["2"]);
}

#[tokio::test]
async fn test_closed_session_ignores_late_results() {
    let client = Arc::new(GatedClient::default());
    let release = client.hold("15", r#"{"results": [{"model_id": 7}]}"#);
    let mut session = SearchSession::new(&Config::default(), client.clone()).expect("session");

    session.submit().expect("submit");
    session.close();
    let _ = release.send(());
    tokio::task::yield_now().await;

    assert!(session.next_completion().await.is_none());
    assert_eq!(session.view(), &ViewState::Loading);
    assert!(session.submit().is_err());
}

#[tokio::test]
async fn test_search_once_posts_form_fields() {
    let mock = Arc::new(MockSearchClient::new());
    mock.push_response(MockResponse::Results(
        ResultSet::from_json_str(r#"{"results": [{"model_id": 5, "precision@": 0.61}]}"#)
            .expect("valid fixture"),
    ));
    let mut session = SearchSession::new(&Config::default(), mock.clone()).expect("session");
    session
        .form_mut()
        .add_metric_filter(MetricChoice::Precision, "50");
    session.form_mut().add_metric_filter(MetricChoice::Recall, "10");

    let state = session.search_once().await.expect("search");
    assert_eq!(loaded_ids(state), vec!["5"]);

    let received = mock.received_queries();
    assert_eq!(received.len(), 1);
    let query = &received[0];
    assert_eq!(query.get("metric0"), Some("precision"));
    assert_eq!(query.get("parameter0"), Some("50"));
    assert_eq!(query.get("metric1"), Some("recall"));
    assert_eq!(query.get("parameter1"), Some("10"));
    assert_eq!(query.get("timestamp"), Some("2016-08-03"));
    assert_eq!(query.get("number"), Some("15"));
}

#[tokio::test]
async fn test_empty_results_render_no_results_state() {
    let mock = Arc::new(MockSearchClient::new());
    mock.push_response(MockResponse::Results(ResultSet::default()));
    let mut session = SearchSession::new(&Config::default(), mock).expect("session");

    let state = session.search_once().await.expect("search");

    assert_eq!(state, &ViewState::Empty);
}

#[tokio::test]
async fn test_server_error_becomes_visible_error_state() {
    let mock = Arc::new(MockSearchClient::new());
    mock.push_response(MockResponse::ServerError {
        status: 500,
        message: "Sorry, no results! Please try again.".to_string(),
    });
    let mut session = SearchSession::new(&Config::default(), mock).expect("session");

    let state = session.search_once().await.expect("search");

    match state {
        ViewState::Error(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("Sorry, no results"));
        }
        other => panic!("expected error state, got {other:?}"),
    }
}

#[tokio::test]
async fn test_poll_completion_only_applies_finished_searches() {
    let client = Arc::new(GatedClient::default());
    let release = client.hold("15", r#"{"results": [{"model_id": 3}]}"#);
    let mut session = SearchSession::new(&Config::default(), client.clone()).expect("session");

    assert!(session.poll_completion().await.is_none());
    session.submit().expect("submit");
    tokio::task::yield_now().await;
    assert!(session.poll_completion().await.is_none());
    assert!(session.is_pending());

    let _ = release.send(());
    let mut applied = false;
    for _ in 0..100 {
        if session.poll_completion().await.is_some() {
            applied = true;
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(applied);
    assert_eq!(loaded_ids(session.view()), vec!["3"]);
}

#[tokio::test]
async fn test_resubmitting_after_completion_reloads() {
    let mock = Arc::new(MockSearchClient::new());
    mock.push_response(MockResponse::TransportError("connection refused".to_string()));
    mock.push_response(MockResponse::Results(
        ResultSet::from_json_str(r#"{"results": [{"model_id": 8}]}"#).expect("valid fixture"),
    ));
    let mut session = SearchSession::new(&Config::default(), mock).expect("session");

    assert!(matches!(
        session.search_once().await.expect("search"),
        ViewState::Error(_)
    ));
    let state = session.search_once().await.expect("search");
    assert_eq!(loaded_ids(state), vec!["8"]);
    assert_eq!(session.generation(), 2);
}

#[tokio::test]
async fn test_dropped_wait_keeps_search_pending() {
    let client = Arc::new(GatedClient::default());
    let release = client.hold("15", r#"{"results": [{"model_id": 4}]}"#);
    let mut session = SearchSession::new(&Config::default(), client.clone()).expect("session");

    session.submit().expect("submit");
    let waited = tokio::time::timeout(Duration::from_millis(10), session.next_completion()).await;
    assert!(waited.is_err());
    assert!(session.is_pending());
    assert_eq!(session.view(), &ViewState::Loading);

    let _ = release.send(());
    let state = session.next_completion().await.expect("search still pending");
    assert_eq!(loaded_ids(state), vec!["4"]);
    assert!(!session.is_pending());
}
