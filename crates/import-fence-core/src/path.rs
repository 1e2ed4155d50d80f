//! Dotted module paths and relative-import resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted module path (e.g. `pkg.sub.mod`).
///
/// Module paths are plain text: equality and pattern matching operate on
/// the string form, never on a resolved filesystem module.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    /// Creates a module path from its dotted form.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no module has been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the dot-separated components.
    ///
    /// An empty path yields a single empty component.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of dot-separated components.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.components().count()
    }

    /// Resolves an import specifier relative to this module.
    ///
    /// See [`normalize`].
    #[must_use]
    pub fn resolve(&self, raw_import: &str) -> Self {
        normalize(self, raw_import)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModulePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ModulePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Counts the leading dots of an import specifier.
///
/// Zero means an absolute import.
#[must_use]
pub fn relative_depth(raw_import: &str) -> usize {
    raw_import.len() - raw_import.trim_start_matches('.').len()
}

/// Builds the fully-qualified dotted path of an import specifier.
///
/// An absolute specifier is returned unchanged. A relative specifier with
/// `d` leading dots drops the last `d` components of `current`, then
/// appends `.` and the specifier without its dots:
///
/// ```
/// use import_fence_core::{normalize, ModulePath};
///
/// let current = ModulePath::new("module.under.test");
/// assert_eq!(
///     normalize(&current, "..restricted.some_module").as_str(),
///     "module.restricted.some_module"
/// );
/// ```
///
/// When `d` reaches the component count nothing of `current` is kept and
/// the result starts with a bare `.` (e.g. `a.b` with `...x` gives `.x`).
#[must_use]
pub fn normalize(current: &ModulePath, raw_import: &str) -> ModulePath {
    let depth = relative_depth(raw_import);
    if depth == 0 {
        return ModulePath::new(raw_import);
    }

    let components: Vec<&str> = current.components().collect();
    let keep = components.len().saturating_sub(depth);

    let mut resolved = components[..keep].join(".");
    resolved.push('.');
    resolved.push_str(&raw_import[depth..]);
    ModulePath(resolved)
}

/// Composes the raw specifier for one name of a `from ... import ...` statement.
///
/// `level` dots are prepended to `module`, then `.` and `name` are appended.
/// The separator is kept even when `module` is empty, so `from . import x`
/// gives `..x` and resolves one level above the importer's package.
#[must_use]
pub fn from_import_target(module: &str, level: usize, name: &str) -> String {
    let mut raw = ".".repeat(level);
    raw.push_str(module);
    raw.push('.');
    raw.push_str(name);
    raw
}
