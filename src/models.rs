//! Core data models for the evaluator
//!
//! These models flow through the whole crate: checkers produce findings,
//! the pipeline folds them into an `EvaluationResult`, and reporters
//! render that result for a human reader.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A student file handed to the evaluator.
///
/// Owned by the caller; the core only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
    pub size: u64,
}

impl SourceFile {
    /// Build a file from its path and content, deriving `size` from the content length
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            size: content.len() as u64,
            content,
        }
    }

    /// Lowercased extension of the path, without the leading dot
    pub fn extension(&self) -> Option<String> {
        let name = self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path);
        name.rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Severity levels for technical details
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A structured record pinpointing one rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalDetail {
    pub file: String,
    /// 1-based line, best effort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub issue: String,
    pub severity: Severity,
    pub suggestion: String,
}

/// Something a checker noticed about one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Good practice; never changes the score
    Strength(String),
    /// Something to fix. `weight` is the deduction magnitude (0 for advisory rules).
    Improvement {
        message: String,
        weight: u32,
        detail: Option<TechnicalDetail>,
    },
}

/// Learner level. Only affects wording in rendered feedback, never the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Niveau {
    #[default]
    #[serde(alias = "débutant")]
    Debutant,
    #[serde(alias = "intermédiaire")]
    Intermediaire,
    #[serde(alias = "avancé")]
    Avance,
}

impl Niveau {
    /// Human label with accents, as shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            Niveau::Debutant => "Débutant",
            Niveau::Intermediaire => "Intermédiaire",
            Niveau::Avance => "Avancé",
        }
    }
}

impl FromStr for Niveau {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debutant" | "débutant" => Ok(Niveau::Debutant),
            "intermediaire" | "intermédiaire" => Ok(Niveau::Intermediaire),
            "avance" | "avancé" => Ok(Niveau::Avance),
            _ => Err(anyhow::anyhow!(
                "Unknown niveau '{}'. Valid values: debutant, intermediaire, avance",
                s
            )),
        }
    }
}

impl std::fmt::Display for Niveau {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Niveau::Debutant => write!(f, "debutant"),
            Niveau::Intermediaire => write!(f, "intermediaire"),
            Niveau::Avance => write!(f, "avance"),
        }
    }
}

/// Everything needed for one evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub files: Vec<SourceFile>,
    /// Label only, unused in scoring
    pub competence: String,
    /// Free-text rubric
    pub bareme: String,
    #[serde(default)]
    pub niveau: Niveau,
    /// Passed through untouched
    #[serde(default)]
    pub repository_url: String,
}

/// The sole output of the core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub score: u32,
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub technical_details: Vec<TechnicalDetail>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(SourceFile::new("site/INDEX.HTML", "").extension().as_deref(), Some("html"));
        assert_eq!(SourceFile::new("app.ts", "").extension().as_deref(), Some("ts"));
        assert_eq!(SourceFile::new("Makefile", "").extension(), None);
        assert_eq!(SourceFile::new(".gitignore", "").extension(), None);
        assert_eq!(SourceFile::new("dir.d/README", "").extension(), None);
    }

    #[test]
    fn test_size_from_content() {
        assert_eq!(SourceFile::new("a.css", "body {}").size, 7);
    }

    #[test]
    fn test_niveau_parsing() {
        assert_eq!("debutant".parse::<Niveau>().unwrap(), Niveau::Debutant);
        assert_eq!("Intermédiaire".parse::<Niveau>().unwrap(), Niveau::Intermediaire);
        assert_eq!("AVANCE".parse::<Niveau>().unwrap(), Niveau::Avance);
        assert!("expert".parse::<Niveau>().is_err());
    }

    #[test]
    fn test_niveau_deserializes_with_or_without_accents() {
        let accented: Niveau = serde_json::from_str("\"intermédiaire\"").expect("accented");
        let plain: Niveau = serde_json::from_str("\"intermediaire\"").expect("plain");
        assert_eq!(accented, Niveau::Intermediaire);
        assert_eq!(plain, Niveau::Intermediaire);
        assert_eq!(serde_json::from_str::<Niveau>("\"débutant\"").unwrap(), Niveau::Debutant);
        assert_eq!(serde_json::from_str::<Niveau>("\"avancé\"").unwrap(), Niveau::Avance);
        assert_eq!(serde_json::to_string(&Niveau::Avance).unwrap(), "\"avance\"");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = EvaluationResult {
            score: 18,
            summary: "ok".into(),
            strengths: vec![],
            improvements: vec!["Ajouter DOCTYPE".into()],
            technical_details: vec![TechnicalDetail {
                file: "index.html".into(),
                line: Some(1),
                issue: "DOCTYPE manquant".into(),
                severity: Severity::Error,
                suggestion: "Ajouter <!DOCTYPE html>".into(),
            }],
            recommendations: vec![],
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["technicalDetails"][0]["severity"], "error");
        assert_eq!(json["technicalDetails"][0]["line"], 1);
        assert!(json.get("technical_details").is_none());
    }

    #[test]
    fn test_detail_without_line_omits_field() {
        let detail = TechnicalDetail {
            file: "a.js".into(),
            line: None,
            issue: "x".into(),
            severity: Severity::Info,
            suggestion: "y".into(),
        };
        let json = serde_json::to_value(&detail).expect("serialize");
        assert!(json.get("line").is_none());
    }
}
