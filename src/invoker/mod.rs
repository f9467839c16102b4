//! Generation backend abstraction.
//!
//! A backend turns one assembled prompt into one blocking completion
//! request against the configured model endpoint. No retries, no
//! streaming, no partial results: a call either returns the full
//! response text or a typed [`GenerationError`] carrying the proximate
//! cause. The backend is chosen once at startup, never per call.

pub mod ollama;
pub mod openai;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::ValueEnum;
use thiserror::Error;

use crate::constants;
use crate::prompt::Prompt;

/// Errors from a generation backend.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("model endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("model endpoint returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("backend not configured: {0}")]
    NotConfigured(String),
}

/// Capability interface for text generation.
///
/// Implementations issue exactly one request per call and extract the
/// single text field from the response body.
#[async_trait]
pub trait GenerateBackend: Send + Sync {
    /// Generate a completion for `prompt`, waiting at most `timeout`.
    async fn generate(
        &self,
        prompt: &Prompt,
        timeout: Duration,
    ) -> Result<String, GenerationError>;
}

/// Supported backend kinds, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Local model server speaking the `/api/generate` protocol.
    Ollama,
    /// OpenAI-style hosted chat-completion API.
    #[value(name = "openai")]
    OpenAi,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Ollama => write!(f, "ollama"),
            BackendKind::OpenAi => write!(f, "openai"),
        }
    }
}

/// Build the backend selected by `kind`.
///
/// `model_url` falls back to the per-backend default when not given.
/// The openai backend refuses to start without an API key.
pub fn create_backend(
    kind: BackendKind,
    model_url: Option<String>,
    model: String,
    api_key: Option<String>,
) -> Result<Arc<dyn GenerateBackend>, GenerationError> {
    match kind {
        BackendKind::Ollama => {
            let url = model_url.unwrap_or_else(|| constants::DEFAULT_OLLAMA_URL.to_string());
            Ok(Arc::new(ollama::OllamaBackend::new(url, model)))
        }
        BackendKind::OpenAi => {
            let url = model_url.unwrap_or_else(|| constants::DEFAULT_OPENAI_URL.to_string());
            let api_key = api_key.ok_or_else(|| {
                GenerationError::NotConfigured(
                    "the openai backend requires --model-api-key or REDLINE_MODEL_API_KEY"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(openai::OpenAiBackend::new(url, model, api_key)))
        }
    }
}
