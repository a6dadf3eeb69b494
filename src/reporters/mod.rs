//! Output reporters for evaluation results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - The `EvaluationResult` as machine-readable JSON
//! - `markdown` - Feedback document addressed to the student

mod json;
mod markdown;
mod text;

use crate::models::{EvaluationRequest, EvaluationResult, Niveau};
use crate::rubric::Rubric;
use crate::sources;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// What a reporter knows about the evaluation besides its result
#[derive(Debug, Clone)]
pub struct FeedbackContext {
    pub student: String,
    pub repository_url: String,
    pub competence: String,
    pub niveau: Niveau,
    pub rubric: Rubric,
}

impl FeedbackContext {
    pub fn from_request(request: &EvaluationRequest) -> Self {
        let student = if request.repository_url.is_empty() {
            "Étudiant".to_string()
        } else {
            sources::student_name(sources::repo_name(&request.repository_url)).to_string()
        };

        Self {
            student,
            repository_url: request.repository_url.clone(),
            competence: request.competence.clone(),
            niveau: request.niveau,
            rubric: Rubric::parse(&request.bareme),
        }
    }

    /// Score as a percentage of the rubric ceiling. An empty ceiling counts as full marks.
    pub fn percentage(&self, score: u32) -> u32 {
        if self.rubric.score_max == 0 {
            return 100;
        }
        (u64::from(score) * 100 / u64::from(self.rubric.score_max)) as u32
    }
}

/// Render a result in the specified format
pub fn report(result: &EvaluationResult, context: &FeedbackContext, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(result, context, fmt)
}

/// Render a result using an OutputFormat enum
pub fn report_with_format(
    result: &EvaluationResult,
    context: &FeedbackContext,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(result, context),
        OutputFormat::Json => json::render(result),
        OutputFormat::Markdown => markdown::render(result, context),
    }
}

/// Recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}
