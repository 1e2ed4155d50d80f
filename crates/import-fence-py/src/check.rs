//! Feeds extracted import statements through the restriction engine.
//!
//! One [`ModuleSession`](import_fence_core::ModuleSession) is opened per
//! file, and every record it returns is attributed to the location of the
//! statement that produced it.

use std::path::Path;
use tracing::debug;

use import_fence_core::{ImportRestriction, Location, Severity, Violation, ViolationRecord};

use crate::extractor::{ExtractError, FileAnalysis, ImportKind, ImportStmt, LanguageExtractor};

/// Checks a file that has already been analyzed.
///
/// Files without a known module are skipped.
#[must_use]
pub fn check_analysis(
    engine: &ImportRestriction,
    analysis: &FileAnalysis,
    severity: Severity,
) -> Vec<Violation> {
    let Some(module) = &analysis.module else {
        return Vec::new();
    };

    let session = engine.enter_module(module.clone());
    let mut violations = Vec::new();

    for stmt in &analysis.imports {
        let records = match &stmt.kind {
            ImportKind::Plain { names } => session.on_import(names.as_slice()),
            ImportKind::From {
                module,
                level,
                names,
            } => session.on_from_import(module, *level, names.as_slice()),
        };

        violations.extend(
            records
                .iter()
                .map(|record| to_violation(engine, record, stmt, &analysis.file_path, severity)),
        );
    }

    violations
}

/// Analyzes and checks one source file.
///
/// `relative_path` is relative to the source root and determines the
/// importing module. Files the extractor cannot map to a module, and files
/// no rule governs, are not parsed at all.
///
/// # Errors
///
/// Returns an error if the extractor fails.
pub fn check_source(
    engine: &ImportRestriction,
    extractor: &dyn LanguageExtractor,
    relative_path: &Path,
    source: &str,
    severity: Severity,
) -> Result<Vec<Violation>, ExtractError> {
    let Some(module) = extractor.module_path(relative_path) else {
        debug!("{}: no module path, skipping", relative_path.display());
        return Ok(Vec::new());
    };

    if !engine.enter_module(module.clone()).is_restricted() {
        debug!("{}: module {module} is unrestricted", relative_path.display());
        return Ok(Vec::new());
    }

    let mut analysis = extractor.analyze(source)?;
    analysis.file_path = relative_path.to_path_buf();
    analysis.module = Some(module);

    Ok(check_analysis(engine, &analysis, severity))
}

fn to_violation(
    engine: &ImportRestriction,
    record: &ViolationRecord,
    stmt: &ImportStmt,
    file: &Path,
    severity: Severity,
) -> Violation {
    let violation = Violation::new(
        ImportRestriction::CODE,
        ImportRestriction::NAME,
        severity,
        Location::new(file.to_path_buf(), stmt.line, stmt.column + 1),
        record.message(),
    );
    match engine.explain(record) {
        Some(help) => violation.with_help(help),
        None => violation,
    }
}
