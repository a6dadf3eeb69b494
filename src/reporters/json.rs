//! JSON reporter
//!
//! Outputs the `EvaluationResult` as pretty-printed JSON with camelCase keys,
//! for piping to jq or storing next to the submission.

use crate::models::EvaluationResult;
use anyhow::Result;

/// Render result as JSON
pub fn render(result: &EvaluationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
