//! Contract tests for the chat matching backend against wiremock:
//! request construction, candidate extraction, and the degrade-to-empty
//! behavior on malformed output and backend failure.

use crosswalk_core::ControlId;
use crosswalk_matcher::{
    ChatMatchBackend, ChatMatcherConfig, ControlSet, ControlText, MatchBackend, MatchOutcome,
};
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> ChatMatchBackend {
    let config = ChatMatcherConfig::new(server.uri(), "test-api-key", "test-model");
    ChatMatchBackend::new(config).expect("backend build")
}

fn control_set(texts: &[&str]) -> ControlSet {
    ControlSet {
        product_id: crosswalk_core::ProductId::new(),
        controls: texts
            .iter()
            .map(|t| ControlText {
                id: ControlId::new(),
                text: (*t).to_string(),
            })
            .collect(),
    }
}

fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "model": "test-model",
    })
}

#[tokio::test]
async fn well_formed_answer_yields_candidates() {
    let server = MockServer::start().await;
    let (s, t) = (Uuid::new_v4(), Uuid::new_v4());

    let answer = serde_json::json!([
        {"source_id": s.to_string(), "target_id": t.to_string(), "confidence": 0.93}
    ])
    .to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(&answer)))
        .expect(1)
        .mount(&server)
        .await;

    let a = control_set(&["Data encrypted at rest"]);
    let b = control_set(&["Encryption of data at rest"]);
    match backend(&server).propose(&a, &b).await {
        MatchOutcome::Candidates(c) => {
            assert_eq!(c.len(), 1);
            assert_eq!(c[0].source_id, ControlId::from_uuid(s));
            assert_eq!(c[0].target_id, ControlId::from_uuid(t));
            assert_eq!(c[0].confidence.value(), 0.93);
        }
        other => panic!("expected candidates, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_answer_is_candidates_not_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("[]")))
        .mount(&server)
        .await;

    let outcome = backend(&server)
        .propose(&control_set(&["a"]), &control_set(&["b"]))
        .await;
    assert_eq!(outcome, MatchOutcome::Candidates(vec![]));
}

#[tokio::test]
async fn malformed_answer_degrades_to_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_reply("Sorry, I could not find any equivalences.")),
        )
        .mount(&server)
        .await;

    let outcome = backend(&server)
        .propose(&control_set(&["a"]), &control_set(&["b"]))
        .await;
    assert!(matches!(outcome, MatchOutcome::Failed { .. }), "got {outcome:?}");
    assert!(outcome.into_candidates().is_empty());
}

#[tokio::test]
async fn backend_5xx_degrades_to_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let outcome = backend(&server)
        .propose(&control_set(&["a"]), &control_set(&["b"]))
        .await;
    match outcome {
        MatchOutcome::Failed { reason } => assert!(reason.contains("503"), "reason: {reason}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_degrades_to_failed() {
    // Connection refused, no server at all.
    let config = ChatMatcherConfig::new("http://127.0.0.1:1", "key", "model");
    let backend = ChatMatchBackend::new(config).expect("backend build");

    let outcome = backend
        .propose(&control_set(&["a"]), &control_set(&["b"]))
        .await;
    assert!(matches!(outcome, MatchOutcome::Failed { .. }));
}
