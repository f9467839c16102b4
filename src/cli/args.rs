//! Clap argument types and input validation.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use redline::constants;
use redline::invoker::BackendKind;

/// AI-powered code review service and CLI.
#[derive(Parser, Debug)]
#[command(name = "redline", version, about = "AI-powered code review service and CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Request AI fixes for local files.
    Fix {
        #[command(subcommand)]
        action: FixAction,
    },

    /// Trigger code reviews.
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Manage authentication settings.
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Host the review service.
    Serve(ServeArgs),
}

/// Fix subcommands.
#[derive(Subcommand, Debug)]
pub enum FixAction {
    /// Request an AI fix for a specific file.
    File(FixFileArgs),
}

/// Arguments for `fix file`.
#[derive(Parser, Debug)]
pub struct FixFileArgs {
    /// Path to the file to fix.
    pub path: PathBuf,

    /// Specific line number to focus on.
    #[arg(long)]
    pub line: Option<u32>,

    /// Additional error context or instructions.
    #[arg(long)]
    pub context: Option<String>,
}

/// Review subcommands.
#[derive(Subcommand, Debug)]
pub enum ReviewAction {
    /// Trigger a review for a pull request.
    Pr(ReviewPrArgs),
}

/// Arguments for `review pr`.
#[derive(Parser, Debug)]
pub struct ReviewPrArgs {
    /// Pull request number.
    pub number: u32,

    /// Repository name (owner/repo).
    #[arg(long)]
    pub repo: Option<String>,

    /// Pre-computed unified diff file.
    #[arg(long)]
    pub diff_file: Option<PathBuf>,

    /// Read the unified diff from stdin.
    #[arg(long, default_value_t = false)]
    pub diff_stdin: bool,

    /// JSON file with static analysis findings to include as context.
    #[arg(long)]
    pub findings_file: Option<PathBuf>,
}

/// Where the diff for a review comes from.
#[derive(Debug, Clone)]
pub enum DiffSource {
    File(PathBuf),
    Stdin,
}

impl ReviewPrArgs {
    /// Check the repository argument and resolve the diff source.
    ///
    /// Both checks happen before any network traffic.
    pub fn validate(&self) -> Result<(String, DiffSource), String> {
        let repo = self
            .repo
            .clone()
            .ok_or_else(|| "please provide --repo owner/name".to_string())?;

        let source = match (&self.diff_file, self.diff_stdin) {
            (Some(path), false) => DiffSource::File(path.clone()),
            (None, true) => DiffSource::Stdin,
            (None, false) => {
                return Err(
                    "one diff source is required: --diff-file or --diff-stdin".to_string()
                );
            }
            (Some(_), true) => {
                return Err("only one diff source allowed: --diff-file or --diff-stdin".to_string());
            }
        };

        Ok((repo, source))
    }
}

/// Auth subcommands.
#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Store the service URL and API key in the per-user config.
    Login {
        /// API key for the review service (prompted when omitted).
        #[arg(long)]
        api_key: Option<String>,

        /// Base URL of the review service.
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Show the current configuration.
    Status,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind the service to.
    #[arg(long, env = "REDLINE_BIND", default_value = constants::DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Generation backend.
    #[arg(long, env = "REDLINE_BACKEND", value_enum, default_value_t = BackendKind::Ollama)]
    pub backend: BackendKind,

    /// Base URL of the model endpoint (defaults per backend).
    #[arg(long, env = "REDLINE_MODEL_URL")]
    pub model_url: Option<String>,

    /// Model to generate with.
    #[arg(long, env = "REDLINE_MODEL", default_value = constants::DEFAULT_MODEL)]
    pub model: String,

    /// API key for hosted model endpoints.
    #[arg(long, env = "REDLINE_MODEL_API_KEY")]
    pub model_api_key: Option<String>,
}
