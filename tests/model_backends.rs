//! Integration tests for the generation backends.
//!
//! Each test spins up a loopback axum listener standing in for the
//! model endpoint, so the real HTTP path (serialization, headers,
//! status handling) is exercised without external services.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use redline::invoker::ollama::OllamaBackend;
use redline::invoker::openai::OpenAiBackend;
use redline::invoker::{GenerateBackend, GenerationError};
use redline::prompt::Prompt;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn prompt() -> Prompt {
    Prompt::new().section("task", "say hi")
}

#[tokio::test]
async fn ollama_backend_extracts_response_field() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&seen);
    let router = Router::new().route(
        "/api/generate",
        post(move |Json(body): Json<Value>| {
            let captured = Arc::clone(&captured);
            async move {
                *captured.lock().unwrap() = Some(body);
                Json(json!({"response": "hello"}))
            }
        }),
    );
    let addr = spawn(router).await;

    let backend = OllamaBackend::new(format!("http://{addr}"), "test-model");
    let text = backend.generate(&prompt(), TIMEOUT).await.unwrap();
    assert_eq!(text, "hello");

    let body = seen.lock().unwrap().take().unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["stream"], json!(false));
    assert!(body["prompt"].as_str().unwrap().contains("say hi"));
}

#[tokio::test]
async fn ollama_backend_maps_non_2xx_to_upstream_status() {
    let router = Router::new().route(
        "/api/generate",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = spawn(router).await;

    let backend = OllamaBackend::new(format!("http://{addr}"), "test-model");
    let result = backend.generate(&prompt(), TIMEOUT).await;
    match result {
        Err(GenerationError::UpstreamStatus { status }) => assert_eq!(status, 500),
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn ollama_backend_rejects_missing_response_field() {
    let router = Router::new().route(
        "/api/generate",
        post(|| async { Json(json!({"unexpected": true})) }),
    );
    let addr = spawn(router).await;

    let backend = OllamaBackend::new(format!("http://{addr}"), "test-model");
    let result = backend.generate(&prompt(), TIMEOUT).await;
    assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
}

#[tokio::test]
async fn ollama_backend_unreachable_endpoint_is_transport_error() {
    // Port 1 is reserved and never listening.
    let backend = OllamaBackend::new("http://127.0.0.1:1", "test-model");
    let result = backend.generate(&prompt(), TIMEOUT).await;
    assert!(matches!(result, Err(GenerationError::Transport(_))));
}

#[tokio::test]
async fn openai_backend_extracts_first_choice() {
    let seen: Arc<Mutex<Option<(Option<String>, Value)>>> = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&seen);
    let router = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let captured = Arc::clone(&captured);
            async move {
                let auth = headers
                    .get("authorization")
                    .map(|v| v.to_str().unwrap().to_string());
                *captured.lock().unwrap() = Some((auth, body));
                Json(json!({"choices": [{"message": {"content": "hi there"}}]}))
            }
        }),
    );
    let addr = spawn(router).await;

    let backend = OpenAiBackend::new(format!("http://{addr}"), "gpt-4o", "sk-test");
    let text = backend.generate(&prompt(), TIMEOUT).await.unwrap();
    assert_eq!(text, "hi there");

    let (auth, body) = seen.lock().unwrap().take().unwrap();
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["messages"][0]["role"], "user");
    assert!(
        body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("say hi")
    );
}

#[tokio::test]
async fn openai_backend_rejects_empty_choices() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let addr = spawn(router).await;

    let backend = OpenAiBackend::new(format!("http://{addr}"), "gpt-4o", "sk-test");
    let result = backend.generate(&prompt(), TIMEOUT).await;
    match result {
        Err(GenerationError::MalformedResponse(msg)) => {
            assert!(msg.contains("no choices"), "got: {msg}");
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn openai_backend_maps_non_2xx_to_upstream_status() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { StatusCode::TOO_MANY_REQUESTS }),
    );
    let addr = spawn(router).await;

    let backend = OpenAiBackend::new(format!("http://{addr}"), "gpt-4o", "sk-test");
    let result = backend.generate(&prompt(), TIMEOUT).await;
    match result {
        Err(GenerationError::UpstreamStatus { status }) => assert_eq!(status, 429),
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }
}
