//! HTTP client for the review service.
//!
//! Thin wrapper over reqwest: resolves the base URL and optional
//! bearer credential from settings and exposes one method per service
//! operation. Each call is a single request with a fixed timeout, no
//! retries.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::config::Settings;
use crate::models::{FixRequest, FixResponse, ReviewRequest, ReviewResponse};

/// Round-trip budget for a fix request: the service's 60 second
/// generation budget plus transfer headroom.
const FIX_TIMEOUT: Duration = Duration::from_secs(90);

/// Round-trip budget for a review request: the service's 120 second
/// generation budget plus transfer headroom.
const REVIEW_TIMEOUT: Duration = Duration::from_secs(180);

/// Maximum length of a service error body echoed back to the user.
const ERROR_BODY_PREVIEW_LEN: usize = 2000;

/// Errors talking to the review service.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to read {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    #[error("could not reach the review service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("review service returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("malformed service response: {0}")]
    MalformedResponse(String),
}

/// Read a source file for the fix operation.
///
/// Returns the bare filename and the full content. Failing to read is
/// fatal to the invocation and happens before any network traffic.
pub fn read_source_file(path: &Path) -> Result<(String, String), ClientError> {
    let content = std::fs::read_to_string(path).map_err(|e| ClientError::File {
        path: path.display().to_string(),
        source: e,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((filename, content))
}

/// Client for the review service HTTP API.
pub struct ApiClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// `POST /fix` with the request as query parameters.
    pub async fn fix(&self, request: &FixRequest) -> Result<FixResponse, ClientError> {
        let builder = self
            .http
            .post(self.endpoint("fix"))
            .query(request)
            .timeout(FIX_TIMEOUT);
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(response).await
    }

    /// `POST /review` with the request as a JSON body.
    pub async fn review(&self, request: &ReviewRequest) -> Result<ReviewResponse, ClientError> {
        let builder = self
            .http
            .post(self.endpoint("review"))
            .json(request)
            .timeout(REVIEW_TIMEOUT);
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Attach the bearer credential when one is configured. The service
    /// itself never checks it; proxies in front of it might.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail = detail.trim();
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail: detail[..detail.len().min(ERROR_BODY_PREVIEW_LEN)].to_string(),
            });
        }
        response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}
