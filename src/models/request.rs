//! Request and response envelopes crossing the service boundary.
//!
//! All four shapes are transient: built per request, never stored,
//! discarded once rendered.

use serde::{Deserialize, Serialize};

use super::finding::Finding;

/// Body of `POST /review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Repository identifier (owner/name).
    pub repo_name: String,
    /// Pull request number.
    pub pr_number: u32,
    /// Unified diff to review, passed to the model verbatim.
    pub diff: String,
    /// Static analysis findings supplied as prompt context.
    #[serde(default)]
    pub findings: Vec<Finding>,
}

/// Parameters of `POST /fix`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixRequest {
    pub filename: String,
    pub content: String,
    /// Line number the fix should focus on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Free-text note from the user (error output, intent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Success envelope returned by `POST /review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub status: String,
    pub ai_review: String,
}

/// Envelope returned by `POST /fix`. Both fields are always present,
/// though `code` may be empty when the model replied without a code
/// block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixResponse {
    pub explanation: String,
    pub code: String,
}
