//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach import-fence how to find import statements and
//! module paths for a new language via Tree-sitter.

use std::path::{Path, PathBuf};

use import_fence_core::ModulePath;

/// What an import statement brings in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    /// `import a.b, c as d`: one dotted name per target, aliases dropped.
    Plain {
        /// Imported module names as written.
        names: Vec<String>,
    },
    /// `from ..pkg import a, b`.
    From {
        /// Module specifier without its leading dots (may be empty).
        module: String,
        /// Number of leading dots.
        level: usize,
        /// Imported names as written, `*` for a wildcard.
        names: Vec<String>,
    },
}

/// A single import statement extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStmt {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
    /// Statement contents.
    pub kind: ImportKind,
}

/// Result of analyzing a single source file with Tree-sitter.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path relative to the source root.
    pub file_path: PathBuf,
    /// Module the file defines, if known.
    pub module: Option<ModulePath>,
    /// All import statements found, in source order.
    pub imports: Vec<ImportStmt>,
    /// Whether the parser had to recover from syntax errors.
    pub has_syntax_errors: bool,
}

/// Errors from running an extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Error detail from tree-sitter.
        message: String,
    },
    /// The parser produced no tree.
    #[error("failed to parse {language} source")]
    Parse {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific Tree-sitter extraction.
///
/// The extractor receives raw source text and returns a [`FileAnalysis`]
/// containing the language-agnostic import statements.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".py", ".pyi"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Module defined by a file at `relative_path` under the source root.
    fn module_path(&self, relative_path: &Path) -> Option<ModulePath>;

    /// Extract import statements from source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing fails.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;

    /// Whether this extractor handles the file at `path`.
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().iter().any(|e| e.trim_start_matches('.') == ext))
    }
}
