//! End-to-end tests against a local HTTP server.
//!
//! These tests run real sessions through `ReqwestHttpClient` against a
//! wiremock server standing in for the fix service.

mod common;

use fixstream::adapters::ReqwestHttpClient;
use fixstream::config::{ClientConfig, ResponseMode};
use fixstream::session::{FailureReason, FixClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{full_session_stream, HttpError, RecordingSink, SinkCall, ORDERING_STREAM};

fn client_for(server: &MockServer, mode: ResponseMode) -> FixClient<ReqwestHttpClient> {
    let config = ClientConfig::default()
        .with_endpoint(format!("{}/debug", server.uri()))
        .with_mode(mode)
        .with_connect_timeout(Duration::from_secs(2));
    let http = ReqwestHttpClient::from_config(&config).expect("client should build");
    FixClient::new(http, config)
}

#[tokio::test]
async fn test_streaming_session_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/debug"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "text/event-stream"))
        .and(body_json(json!({"code": "x = ", "error": "SyntaxError"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(ORDERING_STREAM, "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ResponseMode::Streaming);
    let mut sink = RecordingSink::new();
    let outcome = client.submit("x = ", "SyntaxError", &mut sink).await.unwrap();

    assert!(outcome.is_fixed());
    assert_eq!(
        sink.updates()
            .iter()
            .map(|c| match c {
                SinkCall::Iteration(_) => "iteration",
                SinkCall::Node(_) => "node",
                SinkCall::Result(_) => "result",
                _ => "other",
            })
            .collect::<Vec<_>>(),
        vec!["iteration", "node", "result"]
    );
}

#[tokio::test]
async fn test_full_session_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/debug"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(full_session_stream(), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, ResponseMode::Streaming);
    let mut sink = RecordingSink::new();
    let outcome = client.submit("def add(a, b): return a - b", "", &mut sink).await.unwrap();

    assert_eq!(outcome.progress.iteration, Some(2));
    assert_eq!(outcome.progress.nodes.len(), 5);
    assert_eq!(outcome.result().unwrap().test_output.as_deref(), Some("3"));
    assert!(!client.is_busy());
}

#[tokio::test]
async fn test_server_error_status_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server, ResponseMode::Streaming);
    let mut sink = RecordingSink::new();
    let outcome = client.submit("x", "", &mut sink).await.unwrap();

    assert_eq!(
        outcome.failure(),
        Some(&FailureReason::Transport(HttpError::ServerError {
            status: 500,
            message: "model unavailable".to_string(),
        }))
    );
    assert_eq!(client.sessions_released(), 1);
}

#[tokio::test]
async fn test_legacy_session_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/debug"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "fixed_code": "x = 1",
            "summary": "Defined x",
            "knowledge": [],
            "logs": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ResponseMode::Legacy);
    let mut sink = RecordingSink::new();
    let outcome = client.submit("print(x)", "NameError", &mut sink).await.unwrap();

    assert!(outcome.is_fixed());
    assert_eq!(outcome.result().unwrap().fixed_code, "x = 1");
    assert_eq!(sink.count(|c| matches!(c, SinkCall::Result(_))), 1);
}

#[tokio::test]
async fn test_unreachable_service() {
    let config = ClientConfig::default()
        .with_endpoint("http://127.0.0.1:59999/debug")
        .with_connect_timeout(Duration::from_secs(2));
    let http = ReqwestHttpClient::from_config(&config).unwrap();
    let client = FixClient::new(http, config);
    let mut sink = RecordingSink::new();

    let outcome = client.submit("x", "", &mut sink).await.unwrap();

    assert!(matches!(
        outcome.failure(),
        Some(FailureReason::Transport(_))
    ));
    assert_eq!(sink.calls().last(), Some(&SinkCall::Idle));
    assert!(!client.is_busy());
}
