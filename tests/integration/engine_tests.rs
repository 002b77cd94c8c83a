use std::sync::Arc;

use httpmock::prelude::*;
use roster::app::AppContext;
use roster::cli::OutputFormat;
use roster::config::Config;
use roster::search::{RankPath, SearchEngine};
use serde_json::json;

use crate::{ann_and_bo, client_for, profile};

#[test]
fn semantic_path_ranks_by_similarity_plus_bonus() {
    let server = MockServer::start();
    let mut batch = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200)
            .json_body(json!({"embeddings": [[1.0, 0.0], [0.0, 1.0]]}));
    });

    let engine = SearchEngine::new(Arc::new(client_for(server.base_url())), ann_and_bo());
    batch.assert();
    let status = engine.status();
    assert!(status.index_present);
    assert_eq!(status.dim, Some(2));
    batch.delete();

    // Query points at Bo.
    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200).json_body(json!({"embeddings": [[0.0, 1.0]]}));
    });

    let ranking = engine.search_scored("java services", 2);
    assert_eq!(ranking.path, RankPath::Semantic);
    assert_eq!(ranking.results[0].profile.name, "Bo");
    assert!((ranking.results[0].score - 1.0).abs() < 1e-4);
    assert_eq!(ranking.results[1].profile.name, "Ann");
    assert!((ranking.results[1].score - 0.2).abs() < 1e-4);
}

#[test]
fn query_embedding_failure_falls_back_to_keywords() {
    let server = MockServer::start();
    let mut batch = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200)
            .json_body(json!({"embeddings": [[1.0, 0.0], [0.0, 1.0]]}));
    });
    let engine = SearchEngine::new(Arc::new(client_for(server.base_url())), ann_and_bo());
    batch.delete();

    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(503);
    });

    let ranking = engine.search_scored("python", 2);
    assert_eq!(ranking.path, RankPath::Keyword);
    assert_eq!(ranking.results[0].profile.name, "Ann");
    assert!((ranking.results[0].score - 1.2).abs() < 1e-6);
}

#[test]
fn query_dimension_mismatch_falls_back_to_keywords() {
    let server = MockServer::start();
    let mut batch = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200)
            .json_body(json!({"embeddings": [[1.0, 0.0], [0.0, 1.0]]}));
    });
    let engine = SearchEngine::new(Arc::new(client_for(server.base_url())), ann_and_bo());
    batch.delete();

    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200).json_body(json!({"embeddings": [[0.0, 1.0, 0.0]]}));
    });

    assert_eq!(engine.search_scored("java", 2).path, RankPath::Keyword);
}

#[test]
fn short_index_response_leaves_index_absent() {
    let server = MockServer::start();
    let embed = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200).json_body(json!({"embeddings": [[1.0, 0.0]]}));
    });

    let engine = SearchEngine::new(Arc::new(client_for(server.base_url())), ann_and_bo());
    assert!(!engine.status().index_present);

    let hits_after_build = embed.hits();
    let ranking = engine.search_scored("python", 2);
    assert_eq!(ranking.path, RankPath::Keyword);
    // No index means no query embedding either.
    assert_eq!(embed.hits(), hits_after_build);
}

#[test]
fn answer_uses_generator_when_reachable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(500);
    });
    let chat = server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(200).json_body(json!({
            "message": {"role": "assistant", "content": "Ann, clearly. Shall I set up a call?"}
        }));
    });

    let engine = SearchEngine::new(Arc::new(client_for(server.base_url())), ann_and_bo());
    let answer = engine.answer("python", 5);
    chat.assert();
    assert!(answer.generated);
    assert_eq!(answer.text, "Ann, clearly. Shall I set up a call?");
    assert_eq!(answer.candidates[0].name, "Ann");
}

#[test]
fn answer_falls_back_when_generator_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(500).body("out of memory");
    });

    let engine = SearchEngine::new(Arc::new(client_for(server.base_url())), ann_and_bo());
    let answer = engine.answer("python", 5);
    assert!(!answer.generated);
    assert!(answer.text.contains("• Ann — Engineer, 5 yrs. Notable: —. Skills: python, docker."));
    assert!(answer.text.ends_with('?'));
}

#[test]
fn ingest_rebuilds_index_over_new_collection() {
    let server = MockServer::start();
    let mut two = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200)
            .json_body(json!({"embeddings": [[1.0, 0.0], [0.0, 1.0]]}));
    });
    let engine = SearchEngine::new(Arc::new(client_for(server.base_url())), ann_and_bo());
    assert_eq!(engine.status().dim, Some(2));
    two.delete();

    let mut three = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200)
            .json_body(json!({"embeddings": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]}));
    });
    let report = engine.ingest(vec![profile(3, "Cy", &["go"], 2, "busy")]);
    three.assert();
    assert_eq!(report.total, 3);
    assert_eq!(engine.status().dim, Some(3));
    three.delete();

    server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200).json_body(json!({"embeddings": [[0.0, 0.0, 1.0]]}));
    });
    let ranking = engine.search_scored("golang", 1);
    assert_eq!(ranking.path, RankPath::Semantic);
    assert_eq!(ranking.results[0].profile.name, "Cy");
}

#[test]
fn cold_reindex_embeds_roster_once() {
    let server = MockServer::start();
    let embed = server.mock(|when, then| {
        when.method(POST).path("/api/embed");
        then.status(200)
            .json_body(json!({"embeddings": [[1.0, 0.0], [0.0, 1.0]]}));
    });

    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("employees.json");
    std::fs::write(&snapshot, serde_json::to_string(&ann_and_bo()).unwrap()).unwrap();

    let mut config = Config::default();
    config.provider.base_url = server.base_url();
    config.data.snapshot_path = Some(snapshot);
    let ctx = AppContext::new(
        dir.path().to_path_buf(),
        dir.path().join("config.toml"),
        config,
        OutputFormat::Json,
        0,
    )
    .unwrap();

    let status = ctx.reindex().unwrap();
    assert!(status.index_present);
    assert_eq!(embed.hits(), 1);

    ctx.reindex().unwrap();
    assert_eq!(embed.hits(), 2);
}
