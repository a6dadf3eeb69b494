//! Rubric ("barème") parsing
//!
//! The only numeric signal taken from a rubric is the sum of its
//! `<N> pt` / `<N> pts` tokens. Everything else in the text is a label.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Ceiling used when the rubric carries no points token
pub const DEFAULT_SCORE_MAX: u32 = 20;

static POINTS_PATTERN: OnceLock<Regex> = OnceLock::new();

fn points_pattern() -> &'static Regex {
    POINTS_PATTERN.get_or_init(|| Regex::new(r"(?i)([0-9]+)\s*pts?\b").expect("valid regex"))
}

/// A parsed rubric. Built once per evaluation, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    pub raw_text: String,
    pub score_max: u32,
}

impl Rubric {
    pub fn parse(text: &str) -> Self {
        Self {
            raw_text: text.to_string(),
            score_max: parse_score_max(text),
        }
    }

    /// Labelled criteria found in the rubric, in order of appearance
    pub fn criteria(&self) -> Vec<Criterion> {
        parse_criteria(&self.raw_text)
    }
}

/// One "label (N pts)" entry of a rubric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub label: String,
    pub points: u32,
}

/// Sum of every points token, or [`DEFAULT_SCORE_MAX`] when there is none.
///
/// Never fails. Numbers too large for `u32` saturate, and so does the sum.
pub fn parse_score_max(text: &str) -> u32 {
    let mut matched = false;
    let mut total: u32 = 0;

    for caps in points_pattern().captures_iter(text) {
        matched = true;
        total = total.saturating_add(parse_points(&caps[1]));
    }

    if matched {
        total
    } else {
        DEFAULT_SCORE_MAX
    }
}

fn parse_points(digits: &str) -> u32 {
    // Only digits reach here, so the sole failure mode is overflow
    digits.parse().unwrap_or(u32::MAX)
}

fn parse_criteria(text: &str) -> Vec<Criterion> {
    let mut criteria = Vec::new();

    for segment in text.split([',', ';', '\n']) {
        let mut points: Option<u32> = None;
        for caps in points_pattern().captures_iter(segment) {
            let value = parse_points(&caps[1]);
            points = Some(points.unwrap_or(0).saturating_add(value));
        }
        let Some(points) = points else {
            continue;
        };

        let stripped = points_pattern().replace_all(segment, "");
        let label = stripped
            .replace(['(', ')', '[', ']'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let label = label.trim_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());

        criteria.push(Criterion {
            label: if label.is_empty() {
                format!("Critère {}", criteria.len() + 1)
            } else {
                label.to_string()
            },
            points,
        });
    }

    criteria
}
