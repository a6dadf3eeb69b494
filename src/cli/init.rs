//! Init command - write an example classroom.toml

use crate::config::{CONFIG_FILE_NAME, EXAMPLE_CONFIG};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let repo_path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !repo_path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", repo_path.display());
    }

    println!("\n{} Initializing classroom evaluation\n", style("🎓").bold());

    let config_path = repo_path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        std::fs::write(&config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to create {}", config_path.display()))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(CONFIG_FILE_NAME).cyan()
        );
    }

    println!("\nNext steps:");
    println!("  {} Adjust the rubric", style(CONFIG_FILE_NAME).cyan());
    println!("  {} See suggested files", style("classroom-evaluator structure .").cyan());
    println!("  {} Run the evaluation", style("classroom-evaluator evaluate .").cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config_once() {
        let dir = TempDir::new().unwrap();
        run(dir.path()).unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXAMPLE_CONFIG);

        std::fs::write(&path, "competence = \"Custom\"\n").unwrap();
        run(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "competence = \"Custom\"\n");
    }
}
