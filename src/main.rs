//! redline — AI code review service and CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use redline::client::{self, ApiClient};
use redline::config::Settings;
use redline::env::Env;
use redline::invoker;
use redline::models::{Finding, FixRequest, ReviewRequest};
use redline::service::{self, AppState};

use cli::args::{
    AuthAction, Cli, Command, DiffSource, FixAction, FixFileArgs, ReviewAction, ReviewPrArgs,
    ServeArgs,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fix {
            action: FixAction::File(args),
        } => run_fix(args).await,
        Command::Review {
            action: ReviewAction::Pr(args),
        } => run_review(args).await,
        Command::Auth { action } => run_auth(action),
        Command::Serve(args) => run_serve(args).await,
    }
}

/// Request an AI fix for a local file and render the suggestion.
async fn run_fix(args: FixFileArgs) -> Result<()> {
    // File read happens before the client is built: a bad path never
    // produces network traffic.
    let (filename, content) = client::read_source_file(&args.path)?;

    let settings = Settings::load(&Env::real());
    let api = ApiClient::new(&settings);

    eprintln!("{}", "Asking AI for a fix...".green());
    let request = FixRequest {
        filename,
        content,
        line: args.line,
        context: args.context,
    };
    let response = api.fix(&request).await.context("fix request failed")?;

    cli::print_fix(&response);
    Ok(())
}

/// Trigger a review for a pull request and render the result.
async fn run_review(args: ReviewPrArgs) -> Result<()> {
    let (repo, source) = args.validate().map_err(|e| anyhow::anyhow!(e))?;

    let diff = match source {
        DiffSource::File(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        DiffSource::Stdin => {
            use std::io::Read;
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read diff from stdin")?;
            buf
        }
    };

    let findings: Vec<Finding> = match &args.findings_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid findings JSON in {}", path.display()))?
        }
        None => Vec::new(),
    };

    let settings = Settings::load(&Env::real());
    let api = ApiClient::new(&settings);

    eprintln!(
        "{}",
        format!("Requesting review for PR #{} in {repo}...", args.number).blue()
    );
    let request = ReviewRequest {
        repo_name: repo,
        pr_number: args.number,
        diff,
        findings,
    };
    let response = api.review(&request).await.context("review request failed")?;

    cli::print_review(&response);
    Ok(())
}

/// Manage the stored API URL and key.
fn run_auth(action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login { api_key, api_url } => {
            let mut settings = Settings::load(&Env::real());
            if let Some(url) = api_url {
                settings.api_url = url;
            }

            let key = match api_key {
                Some(key) => key,
                None => cli::prompt_api_key().context("failed to read API key")?,
            };
            if key.is_empty() {
                bail!("API key must not be empty");
            }
            settings.api_key = Some(key);

            let path = settings.save().context("failed to save configuration")?;
            println!(
                "{}",
                format!("Saved configuration to {}", path.display()).green()
            );
        }
        AuthAction::Status => {
            let settings = Settings::load(&Env::real());
            println!("API URL: {}", settings.api_url.blue());
            match settings.api_key {
                Some(_) => println!("API key: {}", "set".green()),
                None => println!("API key: {}", "not set".red()),
            }
        }
    }
    Ok(())
}

/// Host the review service until interrupted.
async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("redline=info")),
        )
        .init();

    let backend =
        invoker::create_backend(args.backend, args.model_url, args.model, args.model_api_key)?;

    service::serve(args.bind, AppState::new(backend))
        .await
        .context("service failed")?;
    Ok(())
}
