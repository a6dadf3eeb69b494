//! Scoring: aggregation, tiers, recommendations and summary
//!
//! # Scoring Formula
//!
//! ```text
//! score = clamp(score_max + Σ delta(file), 0, score_max)
//!
//! Where:
//!   score_max  = Σ "<N> pts" tokens of the rubric (20 when none)
//!   delta      = −Σ weight of every improvement fired in the file (≤ 0)
//! ```
//!
//! The clamp runs once, after every file. Only HTML and CSS rules carry
//! weight; JS/TS rules are advisory.
//!
//! # Example
//!
//! Rubric "Structure HTML (10pts), Style CSS (10pts)" with:
//! - index.html missing its DOCTYPE → −2
//! - style.css with `width: 150%`   → −3
//!
//! score = 20 − 2 − 3 = 15 → top tier (≥ round(0.75 × 20) = 15)

mod aggregator;
mod tiers;

pub use aggregator::{aggregate, clamp_score, Aggregate};
pub use tiers::{focus_line, recommend, summarize, Thresholds, Tier};
