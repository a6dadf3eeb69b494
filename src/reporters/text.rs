//! Text (terminal) reporter with colors and formatting

use crate::models::{EvaluationResult, Severity};
use crate::reporters::FeedbackContext;
use crate::scoring::Tier;
use anyhow::Result;

/// Tier colors (ANSI escape codes)
fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::High => "\x1b[32m", // Green
        Tier::Mid => "\x1b[33m",  // Yellow
        Tier::Low => "\x1b[31m",  // Red
    }
}

/// Severity colors
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",   // Red
        Severity::Warning => "\x1b[33m", // Yellow
        Severity::Info => "\x1b[90m",    // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity tag
fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "[E]",
        Severity::Warning => "[W]",
        Severity::Info => "[I]",
    }
}

/// Render result as formatted terminal output
pub fn render(result: &EvaluationResult, ctx: &FeedbackContext) -> Result<String> {
    let mut out = String::new();
    let max = ctx.rubric.score_max;
    let tier_c = tier_color(Tier::of(result.score, max));

    // Header
    out.push_str(&format!("\n{BOLD}Évaluation : {}{RESET}\n", ctx.competence));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Note: {tier_c}{BOLD}{}/{}{RESET}  Niveau: {}  Étudiant: {}\n\n",
        result.score,
        max,
        ctx.niveau.label(),
        ctx.student
    ));
    out.push_str(&format!("{}\n\n", result.summary));

    if !result.strengths.is_empty() {
        out.push_str(&format!("{BOLD}POINTS FORTS{RESET}\n"));
        for s in &result.strengths {
            out.push_str(&format!("  \x1b[32m+{RESET} {}\n", s));
        }
        out.push('\n');
    }

    if !result.improvements.is_empty() {
        out.push_str(&format!(
            "{BOLD}À AMÉLIORER{RESET} ({})\n",
            result.improvements.len()
        ));
        for s in &result.improvements {
            out.push_str(&format!("  \x1b[33m-{RESET} {}\n", s));
        }
        out.push('\n');
    }

    if !result.technical_details.is_empty() {
        out.push_str(&format!(
            "{DIM}  SEV  FICHIER                    PROBLÈME{RESET}\n"
        ));
        out.push_str(&format!(
            "{DIM}  ─────────────────────────────────────────────────────────{RESET}\n"
        ));
        for d in &result.technical_details {
            let location = match d.line {
                Some(line) => format!("{}:{}", d.file, line),
                None => d.file.clone(),
            };
            out.push_str(&format!(
                "  {}{}{RESET}  {:<25}  {}\n",
                severity_color(d.severity),
                severity_tag(d.severity),
                location,
                d.issue
            ));
            out.push_str(&format!("  {DIM}     → {}{RESET}\n", d.suggestion));
        }
        out.push('\n');
    }

    if !result.recommendations.is_empty() {
        out.push_str(&format!("{BOLD}RECOMMANDATIONS{RESET}\n"));
        for r in &result.recommendations {
            out.push_str(&format!("  • {}\n", r));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_context, test_result};

    #[test]
    fn test_text_render_has_score_and_details() {
        let out = render(&test_result(), &test_context()).unwrap();
        assert!(out.contains("15/20"));
        assert!(out.contains("index.html:1"));
        assert!(out.contains("DOCTYPE manquant"));
        assert!(out.contains("RECOMMANDATIONS"));
    }

    #[test]
    fn test_text_render_skips_empty_sections() {
        let mut result = test_result();
        result.improvements.clear();
        result.technical_details.clear();
        let out = render(&result, &test_context()).unwrap();
        assert!(!out.contains("À AMÉLIORER"));
        assert!(!out.contains("FICHIER"));
        assert!(out.contains("POINTS FORTS"));
    }
}
