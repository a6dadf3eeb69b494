//! Project-level configuration support
//!
//! Loads per-assignment configuration from `classroom.toml` or
//! `.classroomrc.json` in the evaluated directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # classroom.toml
//!
//! competence = "Développement Web HTML/CSS"
//! bareme = "Structure HTML (10pts), Style CSS (10pts)"
//! niveau = "debutant"
//! files = ["index.html", "style.css"]
//!
//! [defaults]
//! format = "markdown"
//! output = "FEEDBACK.md"
//! ```
//!
//! Every key is optional. Command-line flags and `CLASSROOM_*` environment
//! variables take precedence over the file.

use crate::models::Niveau;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the TOML configuration file
pub const CONFIG_FILE_NAME: &str = "classroom.toml";

/// Name of the JSON configuration file, read when no TOML file loads
pub const JSON_CONFIG_FILE_NAME: &str = ".classroomrc.json";

/// Competence label used when none is configured
pub const DEFAULT_COMPETENCE: &str = "Développement Web HTML/CSS";

/// Rubric used when none is configured
pub const DEFAULT_BAREME: &str = "Structure HTML (10pts), Style CSS (10pts)";

/// Content written by `init`
pub const EXAMPLE_CONFIG: &str = r#"# Configuration de l'évaluation automatique

# Compétence évaluée (affichée dans le feedback)
competence = "Développement Web HTML/CSS"

# Barème : seuls les jetons "<N>pts" comptent pour la note maximale
bareme = "Structure HTML (5pts), Styles CSS (8pts), Responsive design (4pts), Bonnes pratiques (3pts)"

# Niveau de l'apprenant : debutant, intermediaire, avance
niveau = "debutant"

# Fichiers à évaluer (par défaut : fichiers suggérés par `structure`)
# files = ["index.html", "css/style.css", "js/script.js"]

[defaults]
# Format de sortie : text, json, markdown
format = "markdown"

# Fichier de sortie (par défaut : sortie standard)
output = "FEEDBACK.md"
"#;

/// Per-assignment configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Competence label
    #[serde(default)]
    pub competence: Option<String>,

    /// Free-text rubric
    #[serde(default)]
    pub bareme: Option<String>,

    /// Learner level
    #[serde(default)]
    pub niveau: Option<Niveau>,

    /// Files to evaluate, relative to the evaluated directory
    #[serde(default)]
    pub files: Vec<String>,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Default values for CLI flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Default output file
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl ProjectConfig {
    pub fn competence_or_default(&self) -> String {
        self.competence
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPETENCE.to_string())
    }

    pub fn bareme_or_default(&self) -> String {
        self.bareme
            .clone()
            .unwrap_or_else(|| DEFAULT_BAREME.to_string())
    }

    pub fn niveau_or_default(&self) -> Niveau {
        self.niveau.unwrap_or_default()
    }
}

/// Load project configuration from the evaluated directory
///
/// Searches for config files in order:
/// 1. `classroom.toml`
/// 2. `.classroomrc.json`
///
/// A file that fails to parse is logged and skipped. Returns defaults when
/// nothing loads.
pub fn load_project_config(repo_path: &Path) -> ProjectConfig {
    // Try TOML first (preferred format)
    let toml_path = repo_path.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    // Try JSON
    let json_path = repo_path.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_example_config_parses() {
        let config: ProjectConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.competence.as_deref(), Some("Développement Web HTML/CSS"));
        assert_eq!(config.niveau, Some(Niveau::Debutant));
        assert!(config.files.is_empty());
        assert_eq!(config.defaults.format.as_deref(), Some("markdown"));
        assert_eq!(config.defaults.output, Some(PathBuf::from("FEEDBACK.md")));
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "bareme = \"Rendu (10pts)\"\nniveau = \"avance\"\nfiles = [\"index.html\"]\n",
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.bareme_or_default(), "Rendu (10pts)");
        assert_eq!(config.niveau_or_default(), Niveau::Avance);
        assert_eq!(config.files, vec!["index.html"]);
        assert_eq!(config.competence_or_default(), DEFAULT_COMPETENCE);
    }

    #[test]
    fn test_json_fallback_when_toml_is_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "competence = [").unwrap();
        fs::write(
            dir.path().join(JSON_CONFIG_FILE_NAME),
            r#"{"competence": "JavaScript", "defaults": {"format": "json"}}"#,
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.competence.as_deref(), Some("JavaScript"));
        assert_eq!(config.defaults.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_project_config(dir.path());
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.bareme_or_default(), DEFAULT_BAREME);
        assert_eq!(config.niveau_or_default(), Niveau::Debutant);
    }

    #[test]
    fn test_accented_niveau_keeps_the_rest_of_the_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "bareme = \"Projet (40pts)\"\nniveau = \"intermédiaire\"\nfiles = [\"style.css\"]\n",
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.bareme.as_deref(), Some("Projet (40pts)"));
        assert_eq!(config.niveau, Some(Niveau::Intermediaire));
        assert_eq!(config.files, vec!["style.css"]);
    }

    #[test]
    fn test_accented_niveau_in_json_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(JSON_CONFIG_FILE_NAME),
            r#"{"niveau": "avancé", "bareme": "Rendu (8pts)"}"#,
        )
        .unwrap();

        let config = load_project_config(dir.path());
        assert_eq!(config.niveau_or_default(), Niveau::Avance);
        assert_eq!(config.bareme_or_default(), "Rendu (8pts)");
    }

    #[test]
    fn test_unknown_niveau_is_rejected_and_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "niveau = \"expert\"\n").unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
    }
}
