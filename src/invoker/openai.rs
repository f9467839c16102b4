//! Hosted chat-completion backend.
//!
//! Issues an OpenAI-style `/v1/chat/completions` call with a single
//! user message and extracts `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GenerateBackend, GenerationError};
use crate::prompt::Prompt;

/// Backend for an OpenAI-style hosted completion API.
pub struct OpenAiBackend {
    base_url: String,
    model: String,
    api_key: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl GenerateBackend for OpenAiBackend {
    async fn generate(
        &self,
        prompt: &Prompt,
        timeout: Duration,
    ) -> Result<String, GenerationError> {
        let rendered = prompt.render();
        let body = ChatBody {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &rendered,
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(timeout)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                GenerationError::MalformedResponse("response contained no choices".to_string())
            })
    }
}
