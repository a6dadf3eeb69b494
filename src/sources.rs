//! Local retrieval of student files
//!
//! Reads the files an evaluation needs from a checked-out repository and
//! lists what the repository contains. Nothing here is seen by the
//! evaluation core, which only ever receives `SourceFile` values.

use crate::models::SourceFile;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

const MAX_SUGGESTED_HTML: usize = 3;
const MAX_SUGGESTED_CSS: usize = 2;
const MAX_SUGGESTED_SCRIPTS: usize = 3;

/// One file of the repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Path relative to the root, `/`-separated
    pub path: String,
    pub size: u64,
}

/// Files of a repository plus the ones worth evaluating
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStructure {
    pub files: Vec<FileEntry>,
    pub suggested_files: Vec<String>,
}

/// Read `paths` relative to `root`. Missing or unreadable files are skipped.
pub fn load_files<S: AsRef<str>>(root: &Path, paths: &[S]) -> Vec<SourceFile> {
    let mut files = Vec::with_capacity(paths.len());
    for rel in paths {
        let rel = rel.as_ref();
        let full = root.join(rel);
        match std::fs::read_to_string(&full) {
            Ok(content) => {
                debug!("Loaded {} ({} bytes)", rel, content.len());
                files.push(SourceFile::new(rel, content));
            }
            Err(e) => warn!("Skipping {}: {}", full.display(), e),
        }
    }
    files
}

/// List the repository, respecting .gitignore, and suggest files to evaluate
pub fn repository_structure(root: &Path) -> Result<RepositoryStructure> {
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(FileEntry {
            path: rel.to_string_lossy().replace('\\', "/"),
            size,
        });
    }
    debug!("Found {} file(s) under {}", files.len(), root.display());

    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    let suggested_files = suggest_files(&paths);

    Ok(RepositoryStructure {
        files,
        suggested_files,
    })
}

/// Pick the files worth evaluating: up to 3 pages, 2 stylesheets, 3 scripts,
/// then the first README or documentation file.
pub fn suggest_files(paths: &[&str]) -> Vec<String> {
    let mut suggestions = Vec::new();
    suggestions.extend(with_extension(paths, &["html"], MAX_SUGGESTED_HTML));
    suggestions.extend(with_extension(paths, &["css"], MAX_SUGGESTED_CSS));
    suggestions.extend(with_extension(paths, &["js", "ts"], MAX_SUGGESTED_SCRIPTS));

    if let Some(doc) = paths.iter().find(|p| {
        let lower = p.to_lowercase();
        lower.contains("readme") || lower.contains("documentation")
    }) {
        suggestions.push(doc.to_string());
    }
    suggestions
}

fn with_extension(paths: &[&str], exts: &[&str], limit: usize) -> Vec<String> {
    paths
        .iter()
        .filter(|p| {
            SourceFile::new(**p, "")
                .extension()
                .is_some_and(|e| exts.contains(&e.as_str()))
        })
        .take(limit)
        .map(|p| p.to_string())
        .collect()
}

/// Student name from a classroom repository name: its last `-` segment
pub fn student_name(repo_name: &str) -> &str {
    repo_name.rsplit('-').next().unwrap_or(repo_name)
}

/// Repository name from its URL: last path segment, without `.git`
pub fn repo_name(url: &str) -> &str {
    let last = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url);
    last.strip_suffix(".git").unwrap_or(last)
}
