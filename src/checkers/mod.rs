//! Per-file-kind checkers
//!
//! This module defines the core abstractions for checking student files:
//! - `Checker` trait that every file-kind checker implements
//! - `FileReport` carrying the findings and score delta of one file
//! - `CheckerRegistry` routing a file to its checker by extension
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               CheckerRegistry                │
//! │  - routes each file by extension             │
//! │  - unknown extensions are skipped            │
//! └──────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┼───────────────┐
//!        ▼               ▼               ▼
//!  ┌───────────┐   ┌───────────┐   ┌───────────┐
//!  │HtmlChecker│   │CssChecker │   │ JsChecker │
//!  │  .html    │   │   .css    │   │ .js / .ts │
//!  └───────────┘   └───────────┘   └───────────┘
//!        └───────────────┼───────────────┘
//!                        ▼
//!            rules::evaluate(table, file)
//! ```
//!
//! Checkers are pure functions of a single file's text: they never see
//! other files, the rubric, or the running score.

mod css;
mod html;
mod js;
pub mod rules;

pub use css::{CssChecker, CSS_RULES};
pub use html::{HtmlChecker, HTML_RULES};
pub use js::{JsChecker, JS_RULES};
pub use rules::{LineHint, Outcome, Pattern, Rule, Trigger};

use crate::models::{Finding, SourceFile, TechnicalDetail};
use anyhow::Result;
use std::sync::Arc;

/// Findings and score delta produced by checking one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Findings in rule order
    pub findings: Vec<Finding>,
    /// Sum of deductions, always `<= 0`
    pub delta: i64,
}

impl FileReport {
    /// Record a finding, folding its weight into the delta
    pub fn push(&mut self, finding: Finding) {
        if let Finding::Improvement { weight, .. } = &finding {
            self.delta -= i64::from(*weight);
        }
        self.findings.push(finding);
    }

    pub fn strengths(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().filter_map(|f| match f {
            Finding::Strength(msg) => Some(msg.as_str()),
            Finding::Improvement { .. } => None,
        })
    }

    pub fn technical_details(&self) -> impl Iterator<Item = &TechnicalDetail> {
        self.findings.iter().filter_map(|f| match f {
            Finding::Improvement { detail, .. } => detail.as_ref(),
            Finding::Strength(_) => None,
        })
    }
}

/// Trait for all file-kind checkers
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MarkdownChecker;
///
/// impl Checker for MarkdownChecker {
///     fn name(&self) -> &'static str {
///         "markdown"
///     }
///
///     fn extensions(&self) -> &'static [&'static str] {
///         &["md"]
///     }
///
///     fn analyze(&self, file: &SourceFile) -> Result<FileReport> {
///         Ok(rules::evaluate(MARKDOWN_RULES, &file.path, &file.content))
///     }
/// }
/// ```
pub trait Checker: Send + Sync {
    /// Unique identifier, also used as the file-kind label in rule listings
    fn name(&self) -> &'static str;

    /// Lowercase extensions (without the dot) this checker claims
    fn extensions(&self) -> &'static [&'static str];

    /// Check one file
    fn analyze(&self, file: &SourceFile) -> Result<FileReport>;

    /// The declarative rules behind this checker, for listings
    fn rules(&self) -> &'static [Rule] {
        &[]
    }
}

/// Ordered set of checkers; the first one claiming an extension wins
#[derive(Clone)]
pub struct CheckerRegistry {
    checkers: Vec<Arc<dyn Checker>>,
}

impl CheckerRegistry {
    /// An empty registry: every file is skipped
    pub fn empty() -> Self {
        Self { checkers: Vec::new() }
    }

    /// Register a checker after the existing ones
    pub fn with_checker(mut self, checker: Arc<dyn Checker>) -> Self {
        self.checkers.push(checker);
        self
    }

    /// Checker responsible for `file`, or `None` when the extension is not recognized
    pub fn checker_for(&self, file: &SourceFile) -> Option<&dyn Checker> {
        let ext = file.extension()?;
        self.checkers
            .iter()
            .find(|c| c.extensions().contains(&ext.as_str()))
            .map(|c| c.as_ref())
    }

    pub fn checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers.iter().map(|c| c.as_ref())
    }
}

impl Default for CheckerRegistry {
    /// HTML, CSS and JS/TS checkers
    fn default() -> Self {
        Self::empty()
            .with_checker(Arc::new(HtmlChecker))
            .with_checker(Arc::new(CssChecker))
            .with_checker(Arc::new(JsChecker))
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.checkers.iter().map(|c| c.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_routing_by_extension() {
        let registry = CheckerRegistry::default();
        let name = |path: &str| {
            registry
                .checker_for(&SourceFile::new(path, ""))
                .map(|c| c.name())
        };
        assert_eq!(name("index.html"), Some("html"));
        assert_eq!(name("css/STYLE.CSS"), Some("css"));
        assert_eq!(name("script.js"), Some("js"));
        assert_eq!(name("src/app.ts"), Some("js"));
        assert_eq!(name("README.md"), None);
        assert_eq!(name("index.htm"), None);
        assert_eq!(name("Makefile"), None);
    }

    #[test]
    fn test_first_registered_checker_wins() {
        struct Shadow;
        impl Checker for Shadow {
            fn name(&self) -> &'static str {
                "shadow"
            }
            fn extensions(&self) -> &'static [&'static str] {
                &["css"]
            }
            fn analyze(&self, _file: &SourceFile) -> Result<FileReport> {
                Ok(FileReport::default())
            }
        }

        let registry = CheckerRegistry::empty()
            .with_checker(Arc::new(Shadow))
            .with_checker(Arc::new(CssChecker));
        let file = SourceFile::new("a.css", "");
        assert_eq!(registry.checker_for(&file).map(|c| c.name()), Some("shadow"));
    }

    #[test]
    fn test_file_report_push() {
        let mut report = FileReport::default();
        report.push(Finding::Strength("bien".into()));
        report.push(Finding::Improvement {
            message: "corriger".into(),
            weight: 3,
            detail: Some(TechnicalDetail {
                file: "a.css".into(),
                line: Some(2),
                issue: "x".into(),
                severity: Severity::Error,
                suggestion: "y".into(),
            }),
        });
        report.push(Finding::Improvement {
            message: "conseil".into(),
            weight: 0,
            detail: None,
        });

        assert_eq!(report.delta, -3);
        assert_eq!(report.strengths().collect::<Vec<_>>(), vec!["bien"]);
        assert_eq!(report.technical_details().count(), 1);
    }

    #[test]
    fn test_registry_debug_lists_names() {
        let debug = format!("{:?}", CheckerRegistry::default());
        assert_eq!(debug, r#"["html", "css", "js"]"#);
    }
}
