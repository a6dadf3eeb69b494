//! HTML checker
//!
//! Looks for the basics a first web page gets wrong: doctype, document
//! language, viewport, unclosed buttons, and `<div>` used where a text or
//! card element belongs.

use crate::checkers::rules::{self, LineHint, Outcome, Pattern, Rule, Trigger};
use crate::checkers::{Checker, FileReport};
use crate::models::{Severity, SourceFile};
use anyhow::Result;

pub static HTML_RULES: &[Rule] = &[
    Rule {
        id: "doctype",
        pattern: Pattern::Literal("<!DOCTYPE html>"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("DOCTYPE HTML5 correctement déclaré"),
    },
    Rule {
        id: "missing-doctype",
        pattern: Pattern::Literal("<!DOCTYPE html>"),
        trigger: Trigger::WhenAbsent,
        outcome: Outcome::Improvement {
            message: "Ajouter la déclaration DOCTYPE HTML5 dans {file}",
            weight: 2,
            severity: Severity::Error,
            issue: "DOCTYPE manquant",
            suggestion: "Ajouter <!DOCTYPE html> en première ligne du fichier",
            line: LineHint::Fixed(1),
        },
    },
    Rule {
        id: "lang-fr",
        pattern: Pattern::AnyOf(&["lang=\"fr\"", "lang='fr'"]),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Langue du document déclarée (lang=\"fr\")"),
    },
    Rule {
        id: "missing-lang",
        pattern: Pattern::Without {
            present: "<html",
            absent: &["lang="],
        },
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Spécifier la langue du document avec l'attribut lang dans {file}",
            weight: 1,
            severity: Severity::Warning,
            issue: "Attribut lang manquant",
            suggestion: "Ajouter lang=\"fr\" sur la balise <html>",
            line: LineHint::Matched,
        },
    },
    Rule {
        id: "viewport",
        pattern: Pattern::Literal("viewport"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Balise meta viewport présente pour le responsive"),
    },
    Rule {
        id: "missing-viewport",
        pattern: Pattern::Literal("viewport"),
        trigger: Trigger::WhenAbsent,
        outcome: Outcome::Improvement {
            message: "Ajouter la balise meta viewport dans {file}",
            weight: 2,
            severity: Severity::Error,
            issue: "Meta viewport manquante",
            suggestion: "Ajouter <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"> dans <head>",
            line: LineHint::Fixed(5),
        },
    },
    Rule {
        id: "unclosed-button",
        pattern: Pattern::Structural(first_unclosed_button),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Fermer toutes les balises <button> dans {file}",
            weight: 3,
            severity: Severity::Error,
            issue: "Balise <button> non fermée",
            suggestion: "Ajouter la balise fermante </button> correspondante",
            line: LineHint::Matched,
        },
    },
    Rule {
        id: "div-hero-description",
        pattern: Pattern::Literal("<div class=\"hero-description\">"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Utiliser un élément de texte plutôt qu'une <div> pour la description dans {file}",
            weight: 1,
            severity: Severity::Warning,
            issue: "Élément inadapté pour un texte",
            suggestion: "Remplacer <div class=\"hero-description\"> par <p class=\"hero-description\">",
            line: LineHint::Matched,
        },
    },
    Rule {
        id: "div-service-card",
        pattern: Pattern::Literal("<div class=\"service-card\">"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Improvement {
            message: "Utiliser un élément sémantique pour les cartes de service dans {file}",
            weight: 2,
            severity: Severity::Warning,
            issue: "Élément inadapté pour une carte",
            suggestion: "Remplacer <div class=\"service-card\"> par <article class=\"service-card\">",
            line: LineHint::Matched,
        },
    },
    Rule {
        id: "semantic-elements",
        pattern: Pattern::AnyOf(&["<header>", "<main>", "<nav>"]),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("Utilisation d'éléments sémantiques HTML5"),
    },
];

/// HTML files (`.html`)
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlChecker;

impl Checker for HtmlChecker {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["html"]
    }

    fn analyze(&self, file: &SourceFile) -> Result<FileReport> {
        Ok(rules::evaluate(HTML_RULES, &file.path, &file.content))
    }

    fn rules(&self) -> &'static [Rule] {
        HTML_RULES
    }
}

/// Line of the earliest opening `<button` left unmatched, when openings
/// outnumber `</button>` closings.
fn first_unclosed_button(content: &str) -> Option<u32> {
    let mut open_lines: Vec<u32> = Vec::new();
    let mut opens = 0usize;
    let mut closes = 0usize;

    for (idx, line) in content.lines().enumerate() {
        let line_no = (idx + 1) as u32;
        let mut tags: Vec<(usize, bool)> = opening_button_offsets(line)
            .into_iter()
            .map(|at| (at, true))
            .chain(line.match_indices("</button>").map(|(at, _)| (at, false)))
            .collect();
        tags.sort_unstable();

        for (_, is_open) in tags {
            if is_open {
                opens += 1;
                open_lines.push(line_no);
            } else {
                closes += 1;
                open_lines.pop();
            }
        }
    }

    if opens <= closes {
        return None;
    }
    Some(open_lines.first().copied().unwrap_or(1))
}

/// Byte offsets of `<button` immediately followed by `>`, whitespace or `/`
fn opening_button_offsets(line: &str) -> Vec<usize> {
    line.match_indices("<button")
        .filter(|(at, tag)| {
            line[at + tag.len()..]
                .chars()
                .next()
                .map_or(true, |c| c == '>' || c == '/' || c.is_whitespace())
        })
        .map(|(at, _)| at)
        .collect()
}
