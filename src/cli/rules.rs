//! Rules command - list the checks behind every score

use crate::checkers::{CheckerRegistry, Outcome, Rule, Trigger};
use anyhow::Result;
use console::style;

/// Run the rules command
pub fn run() -> Result<()> {
    let registry = CheckerRegistry::default();

    for checker in registry.checkers() {
        let exts: Vec<String> = checker
            .extensions()
            .iter()
            .map(|e| format!(".{e}"))
            .collect();
        println!(
            "\n{} {}",
            style(checker.name().to_uppercase()).bold(),
            style(exts.join(", ")).dim()
        );
        for rule in checker.rules() {
            println!("  {}", describe(rule));
        }
    }

    Ok(())
}

/// One line summarizing a rule
fn describe(rule: &Rule) -> String {
    let when = match rule.trigger {
        Trigger::WhenPresent => "present",
        Trigger::WhenAbsent => "absent",
    };
    match rule.outcome {
        Outcome::Strength(message) => format!(
            "{} {:<28} {:<8} {}",
            style("+").green(),
            rule.id,
            when,
            message
        ),
        Outcome::Improvement {
            weight,
            severity,
            issue,
            ..
        } => format!(
            "{} {:<28} {:<8} -{} {:<8} {}",
            style("-").yellow(),
            rule.id,
            when,
            weight,
            severity.to_string(),
            issue
        ),
    }
}
