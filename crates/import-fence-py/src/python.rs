//! Python language extractor using Tree-sitter.

use std::path::{Component, Path};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use import_fence_core::ModulePath;

use crate::extractor::{ExtractError, FileAnalysis, ImportKind, ImportStmt, LanguageExtractor};

/// Extracts import statements from Python source.
pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    /// Creates a new Python extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    /// Join identifier children of a `dotted_name` node with dots.
    fn dotted_name(node: &Node<'_>, src: &[u8]) -> String {
        let mut parts = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "identifier" {
                parts.push(Self::text(&child, src));
            }
        }
        parts.join(".")
    }

    /// Imported names of a statement (`name` fields), aliases dropped.
    fn imported_names(node: &Node<'_>, src: &[u8]) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            match child.kind() {
                "dotted_name" => names.push(Self::dotted_name(&child, src)),
                "aliased_import" => {
                    if let Some(original) = child.child_by_field_name("name") {
                        names.push(Self::dotted_name(&original, src));
                    }
                }
                _ => {}
            }
        }

        let mut cursor = node.walk();
        if node
            .children(&mut cursor)
            .any(|child| child.kind() == "wildcard_import")
        {
            names.push("*".to_string());
        }

        names
    }

    /// Splits `module_name` of a from-import into (module, level).
    fn from_module(node: &Node<'_>, src: &[u8]) -> (String, usize) {
        let Some(module) = node.child_by_field_name("module_name") else {
            return (String::new(), 0);
        };

        if module.kind() == "dotted_name" {
            return (Self::dotted_name(&module, src), 0);
        }

        // relative_import: import_prefix followed by an optional dotted_name
        let mut level = 0;
        let mut name = String::new();
        let mut cursor = module.walk();
        for child in module.children(&mut cursor) {
            match child.kind() {
                "import_prefix" => level = Self::text(&child, src).matches('.').count(),
                "dotted_name" => name = Self::dotted_name(&child, src),
                _ => {}
            }
        }
        (name, level)
    }

    fn extract_import(node: &Node<'_>, src: &[u8]) -> Option<ImportStmt> {
        let kind = match node.kind() {
            "import_statement" => ImportKind::Plain {
                names: Self::imported_names(node, src),
            },
            "import_from_statement" => {
                let (module, level) = Self::from_module(node, src);
                ImportKind::From {
                    module,
                    level,
                    names: Self::imported_names(node, src),
                }
            }
            "future_import_statement" => ImportKind::From {
                module: "__future__".to_string(),
                level: 0,
                names: Self::imported_names(node, src),
            },
            _ => return None,
        };

        Some(ImportStmt {
            line: node.start_position().row + 1,
            column: node.start_position().column,
            kind,
        })
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for PythonExtractor {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py", ".pyi"]
    }

    fn module_path(&self, relative_path: &Path) -> Option<ModulePath> {
        if !self.handles(relative_path) {
            return None;
        }

        let mut parts: Vec<&str> = Vec::new();
        for component in relative_path.components() {
            if let Component::Normal(s) = component {
                parts.push(s.to_str()?);
            }
        }

        let file = parts.pop()?;
        let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
        if stem != "__init__" {
            parts.push(stem);
        }

        if parts.is_empty() {
            return None;
        }
        Some(ModulePath::new(parts.join(".")))
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: self.language_id(),
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::Parse {
            language: self.language_id(),
        })?;
        let root = tree.root_node();

        let mut result = FileAnalysis {
            has_syntax_errors: root.has_error(),
            ..FileAnalysis::default()
        };
        if result.has_syntax_errors {
            debug!("python source has syntax errors; extracting what parsed");
        }

        // Imports may sit anywhere (functions, `if TYPE_CHECKING:`, `try:`),
        // so walk the whole tree in source order.
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let Some(stmt) = Self::extract_import(&node, src) {
                result.imports.push(stmt);
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        Ok(result)
    }
}
