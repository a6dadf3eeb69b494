//! Declarative rule tables and the generic runner that evaluates them
//!
//! Every check is a [`Rule`]: a pattern over the raw text, a trigger
//! (fire when the pattern is present, or when it is absent) and an
//! outcome (a strength, or an improvement with its deduction weight and
//! technical detail). The runner walks a table in order, firing each
//! rule at most once per file.

use crate::checkers::FileReport;
use crate::models::{Finding, Severity, TechnicalDetail};

/// What a rule looks for in the file text
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// A literal substring
    Literal(&'static str),
    /// Any one of several literal substrings
    AnyOf(&'static [&'static str]),
    /// `present` occurs and none of `absent` occurs anywhere in the file
    Without {
        present: &'static str,
        absent: &'static [&'static str],
    },
    /// A line holds the declaration but not the declaration followed by `;`
    Unterminated(&'static str),
    /// Any other structural test. Returns the 1-based line of the match.
    Structural(fn(&str) -> Option<u32>),
}

impl Pattern {
    /// 1-based line of the first match, or `None` when the pattern does not match
    pub fn find(&self, content: &str) -> Option<u32> {
        match self {
            Pattern::Literal(needle) => first_line_with(content, |line| line.contains(needle)),
            Pattern::AnyOf(needles) => {
                first_line_with(content, |line| needles.iter().any(|n| line.contains(n)))
            }
            Pattern::Without { present, absent } => {
                if absent.iter().any(|n| content.contains(n)) {
                    return None;
                }
                first_line_with(content, |line| line.contains(present))
            }
            Pattern::Unterminated(declaration) => {
                let terminated = format!("{declaration};");
                first_line_with(content, |line| {
                    line.contains(declaration) && !line.contains(terminated.as_str())
                })
            }
            Pattern::Structural(test) => test(content),
        }
    }
}

/// Whether a rule fires on the presence or on the absence of its pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    WhenPresent,
    WhenAbsent,
}

/// Where the technical detail of an improvement points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHint {
    /// Line of the pattern match, line 1 when there is none
    Matched,
    /// A fixed line, for rules that fire on something missing
    Fixed(u32),
}

/// Line reported when no single matching line can be determined
pub const FALLBACK_LINE: u32 = 1;

/// What a rule produces when it fires.
///
/// Message, issue and suggestion are templates: `{file}` is replaced with
/// the path of the file being checked.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Strength(&'static str),
    Improvement {
        message: &'static str,
        weight: u32,
        severity: Severity,
        issue: &'static str,
        suggestion: &'static str,
        line: LineHint,
    },
}

/// One row of a checker's rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable kebab-case identifier
    pub id: &'static str,
    pub pattern: Pattern,
    pub trigger: Trigger,
    pub outcome: Outcome,
}

impl Rule {
    /// Evaluate this rule against one file. `None` when it does not fire.
    pub fn apply(&self, path: &str, content: &str) -> Option<Finding> {
        let matched = self.pattern.find(content);
        let fired = match self.trigger {
            Trigger::WhenPresent => matched.is_some(),
            Trigger::WhenAbsent => matched.is_none(),
        };
        if !fired {
            return None;
        }

        let finding = match self.outcome {
            Outcome::Strength(message) => Finding::Strength(render(message, path)),
            Outcome::Improvement {
                message,
                weight,
                severity,
                issue,
                suggestion,
                line,
            } => {
                let line = match line {
                    LineHint::Fixed(n) => n,
                    LineHint::Matched => matched.unwrap_or(FALLBACK_LINE),
                };
                Finding::Improvement {
                    message: render(message, path),
                    weight,
                    detail: Some(TechnicalDetail {
                        file: path.to_string(),
                        line: Some(line),
                        issue: render(issue, path),
                        severity,
                        suggestion: render(suggestion, path),
                    }),
                }
            }
        };
        Some(finding)
    }

    /// Deduction this rule applies when it fires (0 for strengths)
    pub fn weight(&self) -> u32 {
        match self.outcome {
            Outcome::Strength(_) => 0,
            Outcome::Improvement { weight, .. } => weight,
        }
    }
}

/// Run a whole rule table over one file, in table order
pub fn evaluate(rules: &[Rule], path: &str, content: &str) -> FileReport {
    let mut report = FileReport::default();
    for rule in rules {
        if let Some(finding) = rule.apply(path, content) {
            report.push(finding);
        }
    }
    report
}

fn render(template: &str, path: &str) -> String {
    template.replace("{file}", path)
}

fn first_line_with(content: &str, predicate: impl Fn(&str) -> bool) -> Option<u32> {
    content
        .lines()
        .position(predicate)
        .map(|idx| (idx + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESENT: Rule = Rule {
        id: "has-foo",
        pattern: Pattern::Literal("foo"),
        trigger: Trigger::WhenPresent,
        outcome: Outcome::Strength("foo dans {file}"),
    };

    const ABSENT: Rule = Rule {
        id: "missing-bar",
        pattern: Pattern::Literal("bar"),
        trigger: Trigger::WhenAbsent,
        outcome: Outcome::Improvement {
            message: "Ajouter bar",
            weight: 2,
            severity: Severity::Error,
            issue: "bar manquant",
            suggestion: "Écrire bar",
            line: LineHint::Fixed(3),
        },
    };

    #[test]
    fn test_literal_line_numbers_are_one_based() {
        assert_eq!(Pattern::Literal("b").find("a\nb\nc"), Some(2));
        assert_eq!(Pattern::Literal("z").find("a\nb"), None);
    }

    #[test]
    fn test_any_of_reports_earliest_line() {
        let pattern = Pattern::AnyOf(&["<nav>", "<header>"]);
        assert_eq!(pattern.find("x\n<header>\n<nav>"), Some(2));
    }

    #[test]
    fn test_without_checks_whole_file() {
        let pattern = Pattern::Without { present: "var ", absent: &["let "] };
        assert_eq!(pattern.find("var a = 1;\nvar b = 2;"), Some(1));
        assert_eq!(pattern.find("var a = 1;\nlet b = 2;"), None);
    }

    #[test]
    fn test_unterminated_declaration() {
        let pattern = Pattern::Unterminated("height: 200px");
        assert_eq!(pattern.find("a {\n  height: 200px;\n}"), None);
        assert_eq!(pattern.find("a {\n  height: 200px;\n}\nb {\n  height: 200px\n}"), Some(5));
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(Pattern::Literal("b").find("a\r\nb\r\n"), Some(2));
    }

    #[test]
    fn test_strength_renders_path() {
        let finding = PRESENT.apply("index.html", "foo").expect("fires");
        assert_eq!(finding, Finding::Strength("foo dans index.html".into()));
        assert!(PRESENT.apply("index.html", "nothing").is_none());
    }

    #[test]
    fn test_absent_rule_uses_fixed_line() {
        let finding = ABSENT.apply("a.css", "foo").expect("fires");
        match finding {
            Finding::Improvement { weight, detail, .. } => {
                assert_eq!(weight, 2);
                let detail = detail.expect("detail");
                assert_eq!(detail.line, Some(3));
                assert_eq!(detail.file, "a.css");
                assert_eq!(detail.severity, Severity::Error);
            }
            other => panic!("unexpected finding: {:?}", other),
        }
        assert!(ABSENT.apply("a.css", "bar").is_none());
    }

    #[test]
    fn test_matched_hint_falls_back_to_line_one() {
        let rule = Rule {
            id: "absent-matched",
            pattern: Pattern::Literal("x"),
            trigger: Trigger::WhenAbsent,
            outcome: Outcome::Improvement {
                message: "m",
                weight: 1,
                severity: Severity::Warning,
                issue: "i",
                suggestion: "s",
                line: LineHint::Matched,
            },
        };
        match rule.apply("f", "abc") {
            Some(Finding::Improvement { detail: Some(d), .. }) => assert_eq!(d.line, Some(FALLBACK_LINE)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_sums_weights_in_order() {
        let report = evaluate(&[PRESENT, ABSENT], "f", "foo");
        assert_eq!(report.delta, -2);
        assert_eq!(report.findings.len(), 2);
        assert!(matches!(report.findings[0], Finding::Strength(_)));
        assert!(matches!(report.findings[1], Finding::Improvement { .. }));
    }
}
