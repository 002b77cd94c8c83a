use httpmock::prelude::*;
use roster::RosterError;
use roster::provider::{Embedder, Generator, HealthProbe};
use serde_json::json;

use crate::client_for;

#[test]
fn embed_batch_posts_model_and_input() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200)
            .json_body(json!({"model": "nomic-embed-text", "embeddings": [[0.1, 0.2], [0.3, 0.4]]}));
    });

    let client = client_for(server.base_url());
    let vectors = client
        .embed(&["a".to_string(), "b".to_string()])
        .unwrap();
    mock.assert();
    assert_eq!(vectors, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
}

#[test]
fn embed_count_mismatch_is_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200).json_body(json!({"embeddings": [[0.1, 0.2]]}));
    });

    let err = client_for(server.base_url())
        .embed(&["a".to_string(), "b".to_string()])
        .unwrap_err();
    assert!(matches!(err, RosterError::MalformedResponse(_)));
    assert_eq!(err.code(), "provider_unavailable");
}

#[test]
fn embed_http_error_is_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(500).body("model not loaded");
    });

    let err = client_for(server.base_url()).embed_one("python").unwrap_err();
    assert!(matches!(err, RosterError::ProviderUnavailable(_)));
}

#[test]
fn embed_missing_field_is_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200).json_body(json!({"error": "oops"}));
    });

    let err = client_for(server.base_url()).embed_one("python").unwrap_err();
    assert!(matches!(err, RosterError::MalformedResponse(_)));
}

#[test]
fn chat_returns_message_content() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(200).json_body(json!({
            "model": "llama3.1:8b",
            "message": {"role": "assistant", "content": "Ann is a great fit. Want me to check her calendar?"},
            "done": true
        }));
    });

    let text = client_for(server.base_url())
        .generate("system", "user")
        .unwrap();
    mock.assert();
    assert_eq!(text, "Ann is a great fit. Want me to check her calendar?");
}

#[test]
fn chat_blank_content_is_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(200).json_body(json!({"message": {"role": "assistant", "content": "  "}}));
    });

    let err = client_for(server.base_url())
        .generate("system", "user")
        .unwrap_err();
    assert!(matches!(err, RosterError::MalformedResponse(_)));
}

#[test]
fn health_probe_hits_tags() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/tags");
        then.status(200).json_body(json!({"models": []}));
    });

    assert!(client_for(server.base_url()).is_healthy());
    mock.assert();
}

#[test]
fn health_probe_unreachable_is_false() {
    // Port 9 (discard) is not an HTTP server.
    assert!(!client_for("http://127.0.0.1:9".to_string()).is_healthy());
}
