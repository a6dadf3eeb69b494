//! JavaScript / TypeScript checker
//!
//! Advisory only: every JS rule has weight 0, so scripts never move the score.

use crate::checkers::rules::{self, LineHint, Outcome, Pattern, Rule, Trigger};
use crate::checkers::{Checker, FileReport};
use crate::models::{Severity, SourceFile};
use anyhow::Result;

pub static JS_RULES: &[Rule] = &[
    Rule {
        id: "event-listeners",
        pattern: Pattern::Literal("addEventListener"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Gestion correcte des événements avec addEventListener"),
    },
    Rule {
        id: "block-scoped-declarations",
        pattern: Pattern::AnyOf(&["const ", "let "]),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Utilisation de const/let pour les déclarations"),
    },
    Rule {
        id: "var-declarations",
        pattern: Pattern::Without {
            present: "var ",
            absent: &["const ", "let "],
        },
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Utiliser const/let au lieu de var dans {file}",
            weight: 0,
            severity: Severity::Info,
            issue: "Déclaration avec var",
            suggestion: "Remplacer var par const (ou let si la variable est réassignée)",
            line: LineHint::Matched,
        },
    },
];

/// Scripts (`.js`, `.ts`)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsChecker;

impl Checker for JsChecker {
    fn name(&self) -> &'static str {
        "js"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "ts"]
    }

    fn analyze(&self, file: &SourceFile) -> Result<FileReport> {
        Ok(rules::evaluate(JS_RULES, &file.path, &file.content))
    }

    fn rules(&self) -> &'static [Rule] {
        JS_RULES
    }
}
