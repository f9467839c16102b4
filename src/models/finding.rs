//! Static-analysis finding records supplied as review context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity reported by an analysis tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational note.
    Info,
    /// Potential issue that should be addressed.
    Warning,
    /// Issue that must be fixed.
    Error,
    /// Issue that blocks merging outright.
    Critical,
}

/// Custom deserializer for Severity that accepts common tool variations.
///
/// Analysis tools disagree on severity vocabulary: "High", "Major",
/// "Blocker", "Note" and friends all show up in the wild. This
/// normalizes them onto the four levels.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "info" | "note" | "suggestion" | "low" | "minor" | "trivial" | "style"
                => Ok(Severity::Info),
            "warning" | "warn" | "medium" | "moderate" | "major"
                => Ok(Severity::Warning),
            "error" | "high" | "severe"
                => Ok(Severity::Error),
            "critical" | "blocker" | "fatal"
                => Ok(Severity::Critical),
            _ => {
                // Fall back to warning for unrecognised severities rather than failing
                Ok(Severity::Warning)
            }
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single static-analysis observation fed to the model as prompt
/// context.
///
/// Closed record type: the named fields are what the prompt renders,
/// unknown keys from callers are dropped at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// File path the tool flagged, relative to the repository root.
    pub file_path: String,
    /// 1-based line number, when the tool reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    /// Name of the tool that produced the finding (semgrep, bandit, ...).
    pub tool_name: String,
    pub severity: Severity,
    pub message: String,
}
