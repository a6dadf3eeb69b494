//! Classroom evaluator - rule-based scoring of student web assignments
//!
//! Scores HTML, CSS and JS/TS files against a free-text rubric: the rubric's
//! `<N> pts` tokens set the ceiling, each broken rule deducts its weight, and
//! the result carries strengths, improvements, pinpointed technical details,
//! tiered recommendations and a one-line summary.
//!
//! ```no_run
//! use classroom_evaluator::models::{EvaluationRequest, Niveau, SourceFile};
//!
//! let request = EvaluationRequest {
//!     files: vec![SourceFile::new("style.css", ".hero { width: 150%; }")],
//!     competence: "Mise en page CSS".into(),
//!     bareme: "Styles CSS (10pts)".into(),
//!     niveau: Niveau::Debutant,
//!     repository_url: String::new(),
//! };
//! let result = classroom_evaluator::evaluate(&request);
//! assert_eq!(result.score, 7);
//! ```

pub mod checkers;
pub mod cli;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod rubric;
pub mod scoring;
pub mod sources;

pub use models::{EvaluationRequest, EvaluationResult};
pub use pipeline::{evaluate, fallback_result, EvaluationError, EvaluationPipeline};
