//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! endpoint defaults, and generation timeouts so a rename only requires
//! changing this file.

use std::time::Duration;

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "redline";

/// Directory name under the per-user config root.
pub const CONFIG_DIR: &str = "redline";

/// Settings filename inside [`CONFIG_DIR`].
pub const CONFIG_FILENAME: &str = "config.json";

/// Default base URL of the review service the client talks to.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default bind address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default base URL of a local model server.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default base URL of the hosted chat-completion API.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Default model name passed to the generation backend.
pub const DEFAULT_MODEL: &str = "llama3:70b";

/// Generation budget for a full review. Large diffs take a while on
/// local models.
pub const REVIEW_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Generation budget for a single-file fix.
pub const FIX_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_URL: &str = "REDLINE_API_URL";
pub const ENV_API_KEY: &str = "REDLINE_API_KEY";
