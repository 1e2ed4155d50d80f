//! # import-fence-py
//!
//! Tree-sitter based host for the import-fence restriction engine.
//!
//! This crate finds import statements in Python source and feeds them to
//! `import-fence-core`, attaching source locations to the resulting
//! violations. It provides:
//!
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`PythonExtractor`] for Python import extraction and module paths
//! - [`check_source`] / [`check_analysis`] to run the engine over a file

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod check;
pub mod extractor;
pub mod python;

pub use check::{check_analysis, check_source};
pub use extractor::{ExtractError, FileAnalysis, ImportKind, ImportStmt, LanguageExtractor};
pub use python::PythonExtractor;
