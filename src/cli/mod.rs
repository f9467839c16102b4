//! CLI command definitions and terminal rendering.
//!
//! Uses clap derive macros for argument definitions; rendering goes
//! through `colored` so failures and labels stand out on a terminal.

pub mod args;

use std::io::{BufRead, Write};

use colored::Colorize;

use redline::models::{FixResponse, ReviewResponse};

/// Render a fix response: explanation first, then the code labelled as
/// executable code.
pub fn print_fix(response: &FixResponse) {
    println!("\n{}", "AI suggestion:".blue().bold());
    println!("{}", response.explanation);

    if !response.code.is_empty() {
        println!("\n{}", "Suggested code:".bold());
        println!("{}", response.code);
    }
}

/// Render a review response.
pub fn print_review(response: &ReviewResponse) {
    println!("\n{}", "AI review:".blue().bold());
    println!("{}", response.ai_review);
}

/// Prompt for an API key on stdin when `--api-key` was not given.
pub fn prompt_api_key() -> std::io::Result<String> {
    eprint!("API key: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
