//! End-to-end generation through the HTTP transport

mod harness;

use axum::http::StatusCode;
use futures_util::TryStreamExt;
use harness::mock_backend::{MockBackend, Reply};
use serde_json::{Map, json};
use trestle_catalog::ModelCatalog;
use trestle_llm::types::Role;
use trestle_llm::{Credentials, LanguageModelPlugin, LlmError, LlmOutput, Message, StreamChunk, StreamModeAuth};

fn catalog() -> ModelCatalog {
    toml::from_str(
        r#"
        [models."gpt-4o-mini"]
        features = ["tool-call"]
        model_properties = { mode = "chat", context_size = 128000 }
        "#,
    )
    .unwrap()
}

fn credentials(endpoint: &str) -> Credentials {
    Credentials {
        endpoint_url: endpoint.to_owned(),
        api_key: None,
        mode: None,
        stream_mode_auth: StreamModeAuth::NotUse,
    }
}

fn delta(body: serde_json::Value) -> serde_json::Value {
    json!({"id": "cmpl-1", "choices": [{"index": 0, "delta": body}]})
}

#[tokio::test]
async fn streamed_reasoning_deltas_are_wrapped_in_think_tags() {
    let backend = MockBackend::start(Reply::Sse(vec![
        delta(json!({"role": "assistant", "reasoning": "a"})),
        delta(json!({"reasoning": "b"})),
        delta(json!({"content": "c"})),
    ]))
    .await
    .unwrap();

    let plugin = LanguageModelPlugin::new(catalog()).unwrap();
    let output = plugin
        .invoke(
            "gpt-4o-mini",
            &credentials(&backend.base_url()),
            vec![Message::text(Role::User, "hi")],
            Map::new(),
            None,
            None,
            true,
            None,
        )
        .await
        .unwrap();

    let LlmOutput::Stream(chunks) = output else {
        panic!("expected a stream");
    };
    let collected: Vec<StreamChunk> = chunks.try_collect().await.unwrap();
    let contents: Vec<&str> = collected.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["<think>\na", "b", "\n</think>c"]);

    assert_eq!(backend.last_request().path, "/v1/chat/completions");
    assert_eq!(backend.last_request().body["stream"], true);
}

#[tokio::test]
async fn stream_ending_mid_reasoning_leaves_tag_unclosed() {
    let backend = MockBackend::start(Reply::Sse(vec![
        delta(json!({"reasoning_content": "thinking"})),
        delta(json!({"reasoning_content": " still"})),
    ]))
    .await
    .unwrap();

    let plugin = LanguageModelPlugin::new(catalog()).unwrap();
    let output = plugin
        .invoke(
            "gpt-4o-mini",
            &credentials(&backend.base_url()),
            vec![Message::text(Role::User, "hi")],
            Map::new(),
            None,
            None,
            true,
            None,
        )
        .await
        .unwrap();

    let LlmOutput::Stream(chunks) = output else {
        panic!("expected a stream");
    };
    let collected: Vec<StreamChunk> = chunks.try_collect().await.unwrap();
    let joined: String = collected.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, "<think>\nthinking still");
    assert!(!joined.contains("</think>"));
}

#[tokio::test]
async fn blocking_invoke_folds_reasoning_and_usage() {
    let backend = MockBackend::with_json(json!({
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "four",
                "reasoning_content": "2+2"
            },
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13}
    }))
    .await
    .unwrap();

    let plugin = LanguageModelPlugin::new(catalog()).unwrap();
    let output = plugin
        .invoke(
            "gpt-4o-mini",
            &credentials(&backend.base_url()),
            vec![Message::text(Role::User, "2+2?")],
            Map::new(),
            None,
            None,
            false,
            None,
        )
        .await
        .unwrap();

    let LlmOutput::Full(response) = output else {
        panic!("expected a full response");
    };
    assert_eq!(response.content, "<think>\n2+2\n</think>four");
    assert_eq!(response.usage.prompt_tokens, 9);
    assert_eq!(response.usage.total_tokens, 13);
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));

    assert!(backend.last_request().body.get("stream").is_none());
}

#[tokio::test]
async fn invoke_as_stream_replays_blocking_response() {
    let backend = MockBackend::with_json(json!({
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "hello"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
    }))
    .await
    .unwrap();

    let plugin = LanguageModelPlugin::new(catalog()).unwrap();
    let chunks = plugin
        .invoke_as_stream(
            "gpt-4o-mini",
            &credentials(&backend.base_url()),
            vec![Message::text(Role::User, "hi")],
            Map::new(),
            None,
            None,
            false,
            None,
        )
        .await
        .unwrap();

    let collected: Vec<StreamChunk> = chunks.try_collect().await.unwrap();
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].content, "hello");
    assert_eq!(collected[0].usage.map(|u| u.total_tokens), Some(4));
    assert_eq!(collected[0].finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn upstream_error_status_surfaces_as_upstream_error() {
    let backend = MockBackend::start(Reply::Json(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"message": "overloaded"}}),
    ))
    .await
    .unwrap();

    let plugin = LanguageModelPlugin::new(catalog()).unwrap();
    let err = plugin
        .invoke(
            "gpt-4o-mini",
            &credentials(&backend.base_url()),
            vec![Message::text(Role::User, "hi")],
            Map::new(),
            None,
            None,
            false,
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Upstream(_)), "got: {err}");
    assert!(err.to_string().contains("500"), "message: {err}");
}
