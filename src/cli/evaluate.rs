//! Evaluate and test-config commands

use crate::config::{load_project_config, ProjectConfig};
use crate::models::{EvaluationRequest, Niveau, SourceFile};
use crate::pipeline::EvaluationPipeline;
use crate::reporters::{self, FeedbackContext};
use crate::sources;
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Flags of the evaluate command; `None` falls back to the project config
#[derive(Debug, Clone, Default)]
pub struct EvaluateArgs {
    pub files: Vec<String>,
    pub competence: Option<String>,
    pub bareme: Option<String>,
    pub niveau: Option<Niveau>,
    pub repository_url: Option<String>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
}

/// Flags of the test-config command
#[derive(Debug, Clone)]
pub struct SampleArgs {
    pub sample_code: String,
    pub file_name: String,
    pub competence: Option<String>,
    pub bareme: Option<String>,
    pub format: String,
}

/// Run the evaluate command
pub fn run(path: &Path, args: EvaluateArgs) -> Result<()> {
    let repo_path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !repo_path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", repo_path.display());
    }

    let config = load_project_config(&repo_path);
    let file_list = files_to_evaluate(&repo_path, &args.files, &config)?;
    let files = sources::load_files(&repo_path, &file_list);
    if files.is_empty() {
        warn!("No readable files to evaluate in {}", repo_path.display());
    }

    let request = EvaluationRequest {
        files,
        competence: args
            .competence
            .unwrap_or_else(|| config.competence_or_default()),
        bareme: args.bareme.unwrap_or_else(|| config.bareme_or_default()),
        niveau: args.niveau.unwrap_or_else(|| config.niveau_or_default()),
        repository_url: args.repository_url.unwrap_or_default(),
    };

    let format = args
        .format
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    // A configured output path is relative to the evaluated directory
    let output = args.output.or_else(|| {
        config
            .defaults
            .output
            .as_ref()
            .map(|p| repo_path.join(p))
    });

    info!(
        "Evaluating {} file(s) in {}",
        request.files.len(),
        repo_path.display()
    );
    let result = EvaluationPipeline::new().evaluate(&request);
    let context = FeedbackContext::from_request(&request);
    let rendered = reporters::report(&result, &context, &format)?;

    emit(&rendered, output.as_deref())
}

/// Run the test-config command
pub fn run_sample(args: SampleArgs) -> Result<()> {
    let request = EvaluationRequest {
        files: vec![SourceFile::new(args.file_name, args.sample_code)],
        competence: args
            .competence
            .unwrap_or_else(|| crate::config::DEFAULT_COMPETENCE.to_string()),
        bareme: args
            .bareme
            .unwrap_or_else(|| crate::config::DEFAULT_BAREME.to_string()),
        niveau: Niveau::default(),
        repository_url: String::new(),
    };

    let result = EvaluationPipeline::new().evaluate(&request);
    let context = FeedbackContext::from_request(&request);
    let rendered = reporters::report(&result, &context, &args.format)?;
    emit(&rendered, None)
}

/// Pick the files to evaluate: flags, then config, then suggestions
fn files_to_evaluate(
    repo_path: &Path,
    requested: &[String],
    config: &ProjectConfig,
) -> Result<Vec<String>> {
    if !requested.is_empty() {
        return Ok(requested.to_vec());
    }
    if !config.files.is_empty() {
        return Ok(config.files.clone());
    }
    let structure = sources::repository_structure(repo_path)?;
    info!(
        "No files requested, using {} suggested file(s)",
        structure.suggested_files.len()
    );
    Ok(structure.suggested_files)
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(out_path) => {
            std::fs::write(out_path, rendered)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            eprintln!(
                "{}Feedback written to: {}",
                style("📄 ").bold(),
                style(out_path.display()).cyan()
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_files_from_flags_win() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig {
            files: vec!["a.css".into()],
            ..Default::default()
        };
        let files = files_to_evaluate(dir.path(), &["b.html".into()], &config).unwrap();
        assert_eq!(files, vec!["b.html"]);
    }

    #[test]
    fn test_files_from_config_then_suggestions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let config = ProjectConfig {
            files: vec!["a.css".into()],
            ..Default::default()
        };
        assert_eq!(files_to_evaluate(dir.path(), &[], &config).unwrap(), vec!["a.css"]);

        let suggested = files_to_evaluate(dir.path(), &[], &ProjectConfig::default()).unwrap();
        assert_eq!(suggested, vec!["index.html"]);
    }

    #[test]
    fn test_evaluate_writes_output_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("style.css"), ".hero {\n  width: 150%;\n}\n").unwrap();
        let out = dir.path().join("result.json");

        run(
            dir.path(),
            EvaluateArgs {
                files: vec!["style.css".into()],
                bareme: Some("CSS (10pts)".into()),
                format: Some("json".into()),
                output: Some(out.clone()),
                ..Default::default()
            },
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["score"], 7);
    }

    #[test]
    fn test_evaluate_rejects_missing_path() {
        let dir = TempDir::new().unwrap();
        assert!(run(&dir.path().join("absent"), EvaluateArgs::default()).is_err());
    }
}
