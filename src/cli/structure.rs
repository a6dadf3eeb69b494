//! Structure command - list files and evaluation suggestions

use crate::sources;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the structure command
pub fn run(path: &Path, json: bool) -> Result<()> {
    let repo_path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    let structure = sources::repository_structure(&repo_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&structure)?);
        return Ok(());
    }

    println!(
        "\n{} Structure du repository {}\n",
        style("📁").bold(),
        style(repo_path.display()).cyan()
    );
    for file in &structure.files {
        println!("  {} {}", file.path, style(format!("({} bytes)", file.size)).dim());
    }

    println!("\n{}", style("Suggestions de fichiers à analyser:").bold());
    if structure.suggested_files.is_empty() {
        println!("  {}", style("aucun fichier HTML, CSS ou JS trouvé").dim());
    }
    for path in &structure.suggested_files {
        println!("  {} {}", style("•").green(), path);
    }

    Ok(())
}
