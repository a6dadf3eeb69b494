//! Score aggregation across files
//!
//! Starts from the rubric ceiling ("perfect until proven otherwise"),
//! applies every file's delta in file order, and clamps exactly once at
//! the end. The running subtotal is allowed to go below zero between files.

use crate::checkers::FileReport;
use crate::models::{Finding, TechnicalDetail};
use tracing::debug;

/// Final score plus the findings of every file, flattened in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub technical_details: Vec<TechnicalDetail>,
}

/// Fold per-file reports into one bounded score
pub fn aggregate<'a>(
    score_max: u32,
    reports: impl IntoIterator<Item = &'a FileReport>,
) -> Aggregate {
    let mut out = Aggregate::default();
    let mut subtotal = i64::from(score_max);

    for report in reports {
        subtotal += report.delta;
        for finding in &report.findings {
            match finding {
                Finding::Strength(msg) => out.strengths.push(msg.clone()),
                Finding::Improvement { message, detail, .. } => {
                    out.improvements.push(message.clone());
                    if let Some(detail) = detail {
                        out.technical_details.push(detail.clone());
                    }
                }
            }
        }
    }

    out.score = clamp_score(subtotal, score_max);
    debug!(subtotal, score = out.score, score_max, "Aggregated score");
    out
}

/// The single clamp into `[0, score_max]`
pub fn clamp_score(subtotal: i64, score_max: u32) -> u32 {
    // Lossless: the clamped value fits in u32
    subtotal.clamp(0, i64::from(score_max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn report(delta: i64, findings: Vec<Finding>) -> FileReport {
        FileReport { findings, delta }
    }

    fn improvement(msg: &str, weight: u32) -> Finding {
        Finding::Improvement {
            message: msg.into(),
            weight,
            detail: Some(TechnicalDetail {
                file: "f".into(),
                line: Some(1),
                issue: msg.into(),
                severity: Severity::Error,
                suggestion: "s".into(),
            }),
        }
    }

    #[test]
    fn test_no_files_keeps_ceiling() {
        let agg = aggregate(20, &Vec::<FileReport>::new());
        assert_eq!(agg.score, 20);
        assert!(agg.strengths.is_empty());
    }

    #[test]
    fn test_deltas_are_summed_in_order() {
        let reports = vec![
            report(-2, vec![Finding::Strength("a".into()), improvement("x", 2)]),
            report(-3, vec![improvement("y", 3), Finding::Strength("b".into())]),
        ];
        let agg = aggregate(20, &reports);
        assert_eq!(agg.score, 15);
        assert_eq!(agg.strengths, vec!["a", "b"]);
        assert_eq!(agg.improvements, vec!["x", "y"]);
        let issues: Vec<_> = agg.technical_details.iter().map(|d| d.issue.as_str()).collect();
        assert_eq!(issues, vec!["x", "y"]);
    }

    #[test]
    fn test_clamped_once_at_the_end() {
        let reports = vec![report(-8, vec![]), report(-8, vec![])];
        assert_eq!(aggregate(5, &reports).score, 0);
    }

    #[test]
    fn test_improvement_without_detail() {
        let reports = vec![report(
            0,
            vec![Finding::Improvement { message: "m".into(), weight: 0, detail: None }],
        )];
        let agg = aggregate(10, &reports);
        assert_eq!(agg.improvements, vec!["m"]);
        assert!(agg.technical_details.is_empty());
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_score(-4, 20), 0);
        assert_eq!(clamp_score(25, 20), 20);
        assert_eq!(clamp_score(i64::from(u32::MAX), u32::MAX), u32::MAX);
        assert_eq!(clamp_score(0, 0), 0);
    }
}
