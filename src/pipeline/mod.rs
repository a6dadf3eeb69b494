//! Evaluation pipeline
//!
//! Orchestrates one evaluation:
//! 1. Parse the rubric ceiling
//! 2. Route every file to its checker
//! 3. Aggregate the per-file deltas into one bounded score
//! 4. Derive recommendations and the summary
//!
//! Any checker error or panic, at any stage, discards the partial work and
//! yields the canned fallback result instead. Callers of [`EvaluationPipeline::evaluate`]
//! always get a well-formed `EvaluationResult`; [`EvaluationPipeline::try_evaluate`]
//! exposes the failure for diagnostics.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::checkers::{CheckerRegistry, FileReport};
use crate::models::{EvaluationRequest, EvaluationResult};
use crate::rubric::{parse_score_max, Rubric};
use crate::scoring;

/// Score of the fallback result, capped at the rubric ceiling
pub const FALLBACK_SCORE: u32 = 12;

/// Where the pipeline was when it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ParsingRubric,
    CheckingFiles,
    Aggregating,
    Recommending,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::ParsingRubric => write!(f, "parsing rubric"),
            Stage::CheckingFiles => write!(f, "checking files"),
            Stage::Aggregating => write!(f, "aggregating"),
            Stage::Recommending => write!(f, "recommending"),
            Stage::Done => write!(f, "done"),
        }
    }
}

/// Why an evaluation fell back
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Checker '{checker}' failed on {path}: {message}")]
    CheckerFault {
        checker: String,
        path: String,
        message: String,
    },

    #[error("Panic while {stage}: {message}")]
    Panic { stage: Stage, message: String },
}

/// Full evaluation pipeline.
#[derive(Debug, Clone, Default)]
pub struct EvaluationPipeline {
    registry: CheckerRegistry,
}

impl EvaluationPipeline {
    /// Pipeline with the HTML, CSS and JS/TS checkers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with a custom set of checkers.
    pub fn with_registry(registry: CheckerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    /// Evaluate a request. Never fails: any fault yields [`fallback_result`].
    pub fn evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        match self.try_evaluate(request) {
            Ok(result) => result,
            Err(e) => {
                warn!("Evaluation failed, returning fallback result: {}", e);
                fallback_result(request)
            }
        }
    }

    /// Evaluate a request, surfacing checker faults and panics as errors.
    pub fn try_evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError> {
        let stage = Cell::new(Stage::ParsingRubric);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(request, &stage)));

        match outcome {
            Ok(result) => result,
            Err(panic_info) => {
                let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Err(EvaluationError::Panic {
                    stage: stage.get(),
                    message,
                })
            }
        }
    }

    fn run(
        &self,
        request: &EvaluationRequest,
        stage: &Cell<Stage>,
    ) -> Result<EvaluationResult, EvaluationError> {
        info!(
            "Evaluating {} file(s) for competence '{}' ({})",
            request.files.len(),
            request.competence,
            request.niveau
        );

        stage.set(Stage::ParsingRubric);
        let rubric = Rubric::parse(&request.bareme);
        debug!("Rubric ceiling: {}", rubric.score_max);

        stage.set(Stage::CheckingFiles);
        let mut reports: Vec<FileReport> = Vec::with_capacity(request.files.len());
        for file in &request.files {
            let Some(checker) = self.registry.checker_for(file) else {
                debug!("Skipping {} (no checker for this extension)", file.path);
                continue;
            };
            let report = checker
                .analyze(file)
                .map_err(|e| EvaluationError::CheckerFault {
                    checker: checker.name().to_string(),
                    path: file.path.clone(),
                    message: e.to_string(),
                })?;
            debug!(
                "Checker {} on {}: {} finding(s), delta {}",
                checker.name(),
                file.path,
                report.findings.len(),
                report.delta
            );
            reports.push(report);
        }

        stage.set(Stage::Aggregating);
        let agg = scoring::aggregate(rubric.score_max, &reports);

        stage.set(Stage::Recommending);
        let recommendations =
            scoring::recommend(agg.score, rubric.score_max, agg.technical_details.len());
        let summary = scoring::summarize(
            agg.score,
            rubric.score_max,
            agg.strengths.len(),
            agg.improvements.len(),
        );

        stage.set(Stage::Done);
        info!("Evaluation complete - Score: {}/{}", agg.score, rubric.score_max);

        Ok(EvaluationResult {
            score: agg.score,
            summary,
            strengths: agg.strengths,
            improvements: agg.improvements,
            technical_details: agg.technical_details,
            recommendations,
        })
    }
}

/// Evaluate with the default checkers.
pub fn evaluate(request: &EvaluationRequest) -> EvaluationResult {
    EvaluationPipeline::new().evaluate(request)
}

/// The canned result returned when an evaluation cannot complete.
pub fn fallback_result(request: &EvaluationRequest) -> EvaluationResult {
    EvaluationResult {
        score: FALLBACK_SCORE.min(parse_score_max(&request.bareme)),
        summary: format!(
            "Évaluation automatique effectuée pour la compétence \"{}\". Analyse de base réalisée sur {} fichier(s).",
            request.competence,
            request.files.len()
        ),
        strengths: vec![
            "Code soumis".to_string(),
            "Structure de projet présente".to_string(),
        ],
        improvements: vec![
            "Évaluation détaillée indisponible".to_string(),
            "Relancer l'évaluation ou demander une correction manuelle".to_string(),
        ],
        technical_details: Vec::new(),
        recommendations: vec![
            "Consulter la documentation du cours".to_string(),
            "Demander un retour manuel du formateur".to_string(),
        ],
    }
}
