//! Score tiers, recommendations and the summary sentence
//!
//! Both the recommendation bundle and the summary template are picked
//! from the same three bands, relative to the rubric ceiling:
//!
//! ```text
//!   [0, low)        low  = round(0.50 × max)   → Low
//!   [low, mid)      mid  = round(0.75 × max)   → Mid
//!   [mid, max]                                 → High
//! ```
//!
//! Rounding is half-up.

use serde::Serialize;

/// Band boundaries for one ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub low: u32,
    pub mid: u32,
}

impl Thresholds {
    pub fn for_max(score_max: u32) -> Self {
        let max = u64::from(score_max);
        // round_half_up(max / 2) and round_half_up(3 * max / 4) in integer arithmetic
        let low = (max + 1) / 2;
        let mid = (3 * max + 2) / 4;
        Self {
            low: low as u32,
            mid: mid as u32,
        }
    }

    pub fn tier(&self, score: u32) -> Tier {
        if score < self.low {
            Tier::Low
        } else if score < self.mid {
            Tier::Mid
        } else {
            Tier::High
        }
    }
}

/// One of the three score bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    pub fn of(score: u32, score_max: u32) -> Self {
        Thresholds::for_max(score_max).tier(score)
    }

    /// Fixed, ordered recommendation bundle for this band
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Tier::Low => &[
                "Revoir les concepts de base (structure HTML, syntaxe CSS)",
                "Pratiquer avec des exercices simples",
                "Valider le code avec le validateur W3C avant de le rendre",
            ],
            Tier::Mid => &[
                "Approfondir les bonnes pratiques",
                "Explorer des fonctionnalités avancées (Flexbox, Grid, media queries)",
            ],
            Tier::High => &["Excellente base, explorer l'optimisation et l'accessibilité"],
        }
    }
}

/// Recommendations for a final score, plus a focus line when details exist
pub fn recommend(score: u32, score_max: u32, technical_detail_count: usize) -> Vec<String> {
    let mut recs: Vec<String> = Tier::of(score, score_max)
        .recommendations()
        .iter()
        .map(|r| r.to_string())
        .collect();

    if technical_detail_count > 0 {
        recs.push(focus_line(technical_detail_count));
    }
    recs
}

pub fn focus_line(technical_detail_count: usize) -> String {
    format!(
        "Focus : {} point(s) technique(s) précis à corriger",
        technical_detail_count
    )
}

/// One human-readable sentence describing the result
pub fn summarize(
    score: u32,
    score_max: u32,
    strength_count: usize,
    improvement_count: usize,
) -> String {
    match Tier::of(score, score_max) {
        Tier::High => format!(
            "Excellent travail : {} point(s) fort(s) identifié(s) et {} amélioration(s) mineure(s) possible(s).",
            strength_count, improvement_count
        ),
        Tier::Mid => format!(
            "Travail correct avec {} point(s) fort(s) ; {} point(s) à améliorer pour progresser.",
            strength_count, improvement_count
        ),
        Tier::Low => format!(
            "Travail à consolider : {} point(s) à corriger, {} point(s) fort(s) identifié(s).",
            improvement_count, strength_count
        ),
    }
}
