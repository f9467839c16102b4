//! Local model server backend.
//!
//! Speaks the `/api/generate` protocol: one POST with
//! `{model, prompt, stream: false}`, one `{response}` body back.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{GenerateBackend, GenerationError};
use crate::prompt::Prompt;

/// Backend for a local model server (e.g. an Ollama instance).
pub struct OllamaBackend {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateReply {
    response: String,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl GenerateBackend for OllamaBackend {
    async fn generate(
        &self,
        prompt: &Prompt,
        timeout: Duration,
    ) -> Result<String, GenerationError> {
        let rendered = prompt.render();
        let body = GenerateBody {
            model: &self.model,
            prompt: &rendered,
            stream: false,
        };

        let response = self
            .http
            .post(self.endpoint())
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

        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_generate_path() {
        let backend = OllamaBackend::new("http://localhost:11434", "llama3:70b");
        assert_eq!(backend.endpoint(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let backend = OllamaBackend::new("http://localhost:11434/", "llama3:70b");
        assert_eq!(backend.endpoint(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn request_body_disables_streaming() {
        let body = GenerateBody {
            model: "llama3:70b",
            prompt: "hello",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "llama3:70b", "prompt": "hello", "stream": false})
        );
    }
}
