//! Route handlers for the review service.

use std::sync::LazyLock;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use regex::Regex;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::AppState;
use crate::constants::{FIX_GENERATION_TIMEOUT, REVIEW_GENERATION_TIMEOUT};
use crate::invoker::GenerationError;
use crate::models::{FixRequest, FixResponse, ReviewRequest, ReviewResponse};
use crate::prompt;

pub async fn root() -> Json<Value> {
    Json(json!({"message": "redline service is running"}))
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// `POST /review`: one backend call, response text relayed verbatim.
pub async fn review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, (StatusCode, Json<Value>)> {
    info!(
        repo = %request.repo_name,
        pr = request.pr_number,
        findings = request.findings.len(),
        "review requested"
    );

    let prompt = prompt::review_prompt(&request.diff, &request.findings);
    match state.backend.generate(&prompt, REVIEW_GENERATION_TIMEOUT).await {
        Ok(text) => Ok(Json(ReviewResponse {
            status: "success".to_string(),
            ai_review: text,
        })),
        Err(err) => Err(generation_failure("review", err)),
    }
}

/// `POST /fix`: one backend call, reply split into explanation and code.
pub async fn fix(
    State(state): State<AppState>,
    Query(request): Query<FixRequest>,
) -> Result<Json<FixResponse>, (StatusCode, Json<Value>)> {
    info!(file = %request.filename, "fix requested");

    let prompt = prompt::fix_prompt(&request);
    match state.backend.generate(&prompt, FIX_GENERATION_TIMEOUT).await {
        Ok(text) => {
            let (explanation, code) = split_reply(&text);
            Ok(Json(FixResponse { explanation, code }))
        }
        Err(err) => Err(generation_failure("fix", err)),
    }
}

/// Map a backend failure to a distinct 502 response carrying the cause.
fn generation_failure(operation: &str, err: GenerationError) -> (StatusCode, Json<Value>) {
    warn!(operation, error = %err, "generation failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"status": "failed", "error": err.to_string()})),
    )
}

/// The closing ``` must appear at the start of a line to avoid matching
/// triple-backticks embedded inside the explanation prose.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\n(.*?)\n```").unwrap());

/// Split a model reply into explanation prose and the first fenced code
/// block. Replies without a fence become all-explanation with empty
/// code.
pub(crate) fn split_reply(text: &str) -> (String, String) {
    match FENCE_RE.captures(text) {
        Some(caps) => {
            let code = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let whole = caps.get(0).expect("capture 0 always present");
            let mut explanation = String::new();
            explanation.push_str(&text[..whole.start()]);
            explanation.push_str(&text[whole.end()..]);
            (explanation.trim().to_string(), code)
        }
        None => (text.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_reply_extracts_fenced_code() {
        let text = "Change the return value.\n```python\nreturn 2\n```\n";
        let (explanation, code) = split_reply(text);
        assert_eq!(explanation, "Change the return value.");
        assert_eq!(code, "return 2");
    }

    #[test]
    fn split_reply_fence_without_language_tag() {
        let text = "Use a constant.\n```\nconst X: u32 = 1;\n```";
        let (explanation, code) = split_reply(text);
        assert_eq!(explanation, "Use a constant.");
        assert_eq!(code, "const X: u32 = 1;");
    }

    #[test]
    fn split_reply_keeps_prose_after_fence() {
        let text = "Before.\n```rust\nlet x = 1;\n```\nAfter.";
        let (explanation, code) = split_reply(text);
        assert!(explanation.contains("Before."));
        assert!(explanation.contains("After."));
        assert_eq!(code, "let x = 1;");
    }

    #[test]
    fn split_reply_without_fence_is_all_explanation() {
        let text = "  Just prose, no code here.  ";
        let (explanation, code) = split_reply(text);
        assert_eq!(explanation, "Just prose, no code here.");
        assert_eq!(code, "");
    }

    #[test]
    fn split_reply_multiline_code_block() {
        let text = "Fix:\n```python\ndef fixed():\n    return 2\n```";
        let (_, code) = split_reply(text);
        assert_eq!(code, "def fixed():\n    return 2");
    }

    #[test]
    fn split_reply_takes_first_of_multiple_fences() {
        let text = "One:\n```\nfirst\n```\nTwo:\n```\nsecond\n```";
        let (explanation, code) = split_reply(text);
        assert_eq!(code, "first");
        assert!(explanation.contains("second"), "later fences stay in prose");
    }
}
