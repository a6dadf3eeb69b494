//! CLI command definitions and handlers

mod evaluate;
mod init;
mod rules;
mod structure;

use crate::models::Niveau;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use evaluate::{EvaluateArgs, SampleArgs};

/// Classroom evaluator - rule-based feedback for HTML/CSS/JS assignments
#[derive(Parser, Debug)]
#[command(name = "classroom-evaluator")]
#[command(
    version,
    about = "Rule-based evaluation of student HTML/CSS/JS files against a point-weighted rubric",
    long_about = "Scores a student's web files against a free-text rubric (\"barème\"), \
starting from the rubric's total points and deducting for each broken rule, then \
writes pedagogical feedback in French.\n\n\
Run without a subcommand to evaluate the current directory:\n  \
classroom-evaluator .",
    after_help = "\
Examples:
  classroom-evaluator evaluate ./tp-portfolio                    Evaluate suggested files
  classroom-evaluator evaluate . --files index.html,style.css    Evaluate specific files
  classroom-evaluator evaluate . --format markdown -o FEEDBACK.md
  classroom-evaluator structure ./tp-portfolio                   List files and suggestions
  classroom-evaluator test-config --sample-code 'div { width: 150% }'
  classroom-evaluator rules                                      List every rule"
)]
pub struct Cli {
    /// Path to the student repository (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example classroom.toml in the repository
    Init,

    /// Evaluate the repository's files and print or write the feedback
    #[command(after_help = "\
Settings are resolved in order: command-line flag, CLASSROOM_* environment
variable, classroom.toml (or .classroomrc.json), built-in default.

Examples:
  classroom-evaluator evaluate .                                   Suggested files, text output
  classroom-evaluator evaluate . --bareme 'HTML (10pts), CSS (10pts)'
  classroom-evaluator evaluate . --format json                     JSON for scripting
  classroom-evaluator evaluate . --niveau avance -f md -o FEEDBACK.md")]
    Evaluate {
        /// Files to evaluate, relative to the repository (comma-separated or repeated)
        #[arg(long, value_delimiter = ',')]
        files: Vec<String>,

        /// Competence label shown in the feedback
        #[arg(long, env = "CLASSROOM_COMPETENCE")]
        competence: Option<String>,

        /// Rubric text; its "<N>pts" tokens set the maximum score
        #[arg(long, env = "CLASSROOM_BAREME")]
        bareme: Option<String>,

        /// Learner level: debutant, intermediaire, avance
        #[arg(long, env = "CLASSROOM_NIVEAU")]
        niveau: Option<Niveau>,

        /// Repository URL, used to name the student in the feedback
        #[arg(long)]
        repository_url: Option<String>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the repository's files and the ones suggested for evaluation
    Structure {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a code sample given on the command line
    TestConfig {
        /// Code to evaluate
        #[arg(long)]
        sample_code: String,

        /// Virtual file name; its extension picks the checker
        #[arg(long, default_value = "style.css")]
        file_name: String,

        /// Competence label
        #[arg(long, env = "CLASSROOM_COMPETENCE")]
        competence: Option<String>,

        /// Rubric text
        #[arg(long, env = "CLASSROOM_BAREME")]
        bareme: Option<String>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,
    },

    /// List every rule of every checker
    Rules,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(&cli.path),

        Some(Commands::Evaluate {
            files,
            competence,
            bareme,
            niveau,
            repository_url,
            format,
            output,
        }) => evaluate::run(
            &cli.path,
            EvaluateArgs {
                files,
                competence,
                bareme,
                niveau,
                repository_url,
                format,
                output,
            },
        ),

        Some(Commands::Structure { json }) => structure::run(&cli.path, json),

        Some(Commands::TestConfig {
            sample_code,
            file_name,
            competence,
            bareme,
            format,
        }) => evaluate::run_sample(SampleArgs {
            sample_code,
            file_name,
            competence,
            bareme,
            format,
        }),

        Some(Commands::Rules) => rules::run(),

        // Default: evaluate with settings from flags, env and config
        None => evaluate::run(&cli.path, EvaluateArgs::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_evaluate_flags() {
        let cli = Cli::try_parse_from([
            "classroom-evaluator",
            "evaluate",
            "tp",
            "--files",
            "index.html,style.css",
            "--niveau",
            "intermédiaire",
            "-f",
            "md",
        ])
        .unwrap();
        assert_eq!(cli.path, PathBuf::from("tp"));
        match cli.command {
            Some(Commands::Evaluate {
                files,
                niveau,
                format,
                ..
            }) => {
                assert_eq!(files, vec!["index.html", "style.css"]);
                assert_eq!(niveau, Some(Niveau::Intermediaire));
                assert_eq!(format.as_deref(), Some("md"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_niveau() {
        assert!(Cli::try_parse_from(["classroom-evaluator", "evaluate", "--niveau", "expert"]).is_err());
    }

    #[test]
    fn test_test_config_defaults_to_stylesheet() {
        let cli =
            Cli::try_parse_from(["classroom-evaluator", "test-config", "--sample-code", "a {}"]).unwrap();
        match cli.command {
            Some(Commands::TestConfig { file_name, format, .. }) => {
                assert_eq!(file_name, "style.css");
                assert_eq!(format, "text");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
