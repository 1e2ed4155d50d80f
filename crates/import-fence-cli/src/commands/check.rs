//! Check command implementation.

use anyhow::{Context, Result};
use import_fence_core::{Config, ImportRestriction, LintResult};
use import_fence_py::{check_source, LanguageExtractor, PythonExtractor};
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Runs the check command.
pub fn run(path: &Path, format: OutputFormat, exclude: Vec<String>, config: &Config) -> Result<()> {
    let engine = ImportRestriction::from_config(&config.restriction)
        .context("Invalid restriction rules")?;
    if engine.rules().is_empty() {
        tracing::warn!("No restriction rules configured; nothing will be reported");
    }

    let extractors: Vec<Box<dyn LanguageExtractor>> = vec![Box::new(PythonExtractor::new())];

    let root = if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        path.join(&config.analyzer.root)
    };

    let mut patterns = config.analyzer.exclude.clone();
    patterns.extend(exclude);
    let excludes = compile_excludes(&patterns)?;

    let files = discover_files(
        &root,
        &excludes,
        config.analyzer.respect_gitignore,
        &extractors,
    )?;

    tracing::info!(
        "Checking {} files against {} restriction rule(s)",
        files.len(),
        engine.rules().len()
    );

    let mut result = LintResult::new();

    for file_path in &files {
        let Some(extractor) = extractors.iter().find(|e| e.handles(file_path)) else {
            continue;
        };

        let source = std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        let rel = file_path.strip_prefix(&root).unwrap_or(file_path);

        let violations = check_source(
            &engine,
            extractor.as_ref(),
            rel,
            &source,
            config.restriction.severity,
        )
        .with_context(|| format!("Failed to analyze {}", rel.display()))?;

        result.violations.extend(violations);
        result.files_checked += 1;
    }

    result.sort();

    super::output::print(&result, format)?;

    if result.has_violations_at(config.restriction.fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern `{p}`")))
        .collect()
}

fn discover_files(
    root: &Path,
    excludes: &[glob::Pattern],
    respect_gitignore: bool,
    extractors: &[Box<dyn LanguageExtractor>],
) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(respect_gitignore);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !extractors.iter().any(|e| e.handles(path)) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if excludes.iter().any(|pattern| pattern.matches_path(rel)) {
            tracing::debug!("Excluded {}", rel.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
