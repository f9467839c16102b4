//! Prompt assembly for the generation backends.
//!
//! A prompt is an ordered list of named sections concatenated into one
//! string. The two operations each have a fixed section layout; the
//! backends receive the assembled [`Prompt`] and render it immediately
//! before dispatch. No size limit is enforced here; an oversized
//! prompt is the model endpoint's to reject.

use crate::models::{Finding, FixRequest};

/// One named block of prompt text.
#[derive(Debug, Clone)]
pub struct PromptSection {
    pub name: &'static str,
    pub text: String,
}

/// An ordered set of named sections, rendered by concatenation.
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    sections: Vec<PromptSection>,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named section, preserving insertion order.
    pub fn section(mut self, name: &'static str, text: impl Into<String>) -> Self {
        self.sections.push(PromptSection {
            name,
            text: text.into(),
        });
        self
    }

    pub fn sections(&self) -> &[PromptSection] {
        &self.sections
    }

    /// Concatenate all sections into the prompt string sent to the model.
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

const REVIEW_INSTRUCTIONS: &str = "TASK:\n\
    Review the code changes. Focus on:\n\
    1. Logic errors\n\
    2. Security vulnerabilities missed by static analysis\n\
    3. Performance issues\n\
    \n\
    Format your response as a Markdown list of issues.";

/// Build the review prompt: reviewer role, findings as context, the
/// diff verbatim, and the fixed instruction block.
pub fn review_prompt(diff: &str, findings: &[Finding]) -> Prompt {
    Prompt::new()
        .section("role", "You are an expert code reviewer.")
        .section(
            "findings",
            format!(
                "CONTEXT:\nThe following are static analysis findings for the code:\n{}",
                render_findings(findings)
            ),
        )
        .section("diff", format!("CODE DIFF:\n{diff}"))
        .section("task", REVIEW_INSTRUCTIONS)
}

/// Build the fix prompt. The focus-line and user-context clauses are
/// appended only when the corresponding field is present.
pub fn fix_prompt(request: &FixRequest) -> Prompt {
    let mut prompt = Prompt::new().section(
        "task",
        format!(
            "Fix the following code in {}:\n\n{}",
            request.filename, request.content
        ),
    );
    if let Some(line) = request.line {
        prompt = prompt.section("focus", format!("Focus on line {line}."));
    }
    if let Some(ref context) = request.context {
        prompt = prompt.section("context", format!("User context: {context}"));
    }
    prompt
}

/// Render findings as one bullet line each.
fn render_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "No static analysis findings were reported.".to_string();
    }
    findings
        .iter()
        .map(|f| {
            let location = match f.line_number {
                Some(line) => format!("{}:{line}", f.file_path),
                None => f.file_path.clone(),
            };
            format!("- [{}] {} {}: {}", f.severity, f.tool_name, location, f.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
