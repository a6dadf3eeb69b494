//! CSS checker

use crate::checkers::rules::{self, LineHint, Outcome, Pattern, Rule, Trigger};
use crate::checkers::{Checker, FileReport};
use crate::models::{Severity, SourceFile};
use anyhow::Result;

pub static CSS_RULES: &[Rule] = &[
    Rule {
        id: "overflowing-width",
        pattern: Pattern::Literal("width: 150%"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Corriger la largeur excessive qui provoque un débordement dans {file}",
            weight: 3,
            severity: Severity::Error,
            issue: "Largeur supérieure à 100%",
            suggestion: "Utiliser width: 100% ou max-width: 100% pour éviter le défilement horizontal",
            line: LineHint::Matched,
        },
    },
    Rule {
        id: "unterminated-height",
        pattern: Pattern::Unterminated("height: 200px"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Terminer chaque déclaration CSS par un point-virgule dans {file}",
            weight: 2,
            severity: Severity::Error,
            issue: "Point-virgule manquant après height",
            suggestion: "Écrire height: 200px; avec le point-virgule final",
            line: LineHint::Matched,
        },
    },
    Rule {
        id: "unterminated-cursor",
        pattern: Pattern::Unterminated("cursor: pointer"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Terminer la déclaration cursor par un point-virgule dans {file}",
            weight: 2,
            severity: Severity::Error,
            issue: "Point-virgule manquant après cursor",
            suggestion: "Écrire cursor: pointer; avec le point-virgule final",
            line: LineHint::Matched,
        },
    },
    Rule {
        id: "border-box",
        pattern: Pattern::Literal("box-sizing: border-box"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Modèle de boîte maîtrisé (box-sizing: border-box)"),
    },
    Rule {
        id: "media-queries",
        pattern: Pattern::Literal("@media"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Design responsive avec media queries"),
    },
    Rule {
        id: "modern-layout",
        pattern: Pattern::AnyOf(&["display: flex", "display: grid"]),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Utilisation de techniques de layout modernes (Flexbox/Grid)"),
    },
    Rule {
        id: "motion",
        pattern: Pattern::AnyOf(&["transition:", "animation:"]),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Transitions ou animations CSS pour l'interactivité"),
    },
    Rule {
        id: "gradients",
        pattern: Pattern::Literal("linear-gradient"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Utilisation de dégradés CSS (linear-gradient)"),
    },
];

/// Stylesheets (`.css`)
#[derive(Debug, Clone, Copy, Default)]
pub struct CssChecker;

impl Checker for CssChecker {
    fn name(&self) -> &'static str {
        "css"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["css"]
    }

    fn analyze(&self, file: &SourceFile) -> Result<FileReport> {
        Ok(rules::evaluate(CSS_RULES, &file.path, &file.content))
    }

    fn rules(&self) -> &'static [Rule] {
        CSS_RULES
    }
}
