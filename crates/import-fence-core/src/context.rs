//! Per-file checking context.

use tracing::warn;

use crate::path::{from_import_target, relative_depth, ModulePath};
use crate::rules::RuleSet;
use crate::types::ViolationRecord;

/// Context for the imports of one source file.
///
/// Created by [`ImportRestriction::enter_module`](crate::ImportRestriction::enter_module)
/// when traversal reaches a new file. The importing module is fixed for the
/// lifetime of the session, so sessions for different files never share
/// mutable state and may run concurrently over the same engine.
#[derive(Debug, Clone)]
pub struct ModuleSession<'a> {
    rules: &'a RuleSet,
    current: ModulePath,
}

impl<'a> ModuleSession<'a> {
    pub(crate) fn new(rules: &'a RuleSet, current: ModulePath) -> Self {
        Self { rules, current }
    }

    /// The importing module this session checks on behalf of.
    #[must_use]
    pub fn current_module(&self) -> &ModulePath {
        &self.current
    }

    /// Whether any rule governs the current module.
    ///
    /// Hosts may use this to skip extracting imports from unrestricted files.
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.rules.applicable(&self.current).next().is_some()
    }

    /// Checks an `import a.b, c` statement.
    ///
    /// Every name is resolved and evaluated on its own.
    #[must_use]
    pub fn on_import<S: AsRef<str>>(&self, names: &[S]) -> Vec<ViolationRecord> {
        names
            .iter()
            .flat_map(|name| self.check(name.as_ref()))
            .collect()
    }

    /// Checks a `from <module> import a, b` statement.
    ///
    /// `level` is the number of leading dots of the statement. Each imported
    /// name is evaluated as `<module>.<name>`.
    #[must_use]
    pub fn on_from_import<S: AsRef<str>>(
        &self,
        module: &str,
        level: usize,
        names: &[S],
    ) -> Vec<ViolationRecord> {
        names
            .iter()
            .flat_map(|name| self.check(&from_import_target(module, level, name.as_ref())))
            .collect()
    }

    /// Resolves a raw import specifier against the current module.
    #[must_use]
    pub fn resolve(&self, raw_import: &str) -> ModulePath {
        let depth = relative_depth(raw_import);
        if depth > 0 && depth >= self.current.depth() {
            warn!(
                module = %self.current,
                import = raw_import,
                depth,
                "relative import climbs above the top-level package"
            );
        }
        self.current.resolve(raw_import)
    }

    fn check(&self, raw_import: &str) -> Vec<ViolationRecord> {
        let imported = self.resolve(raw_import);
        self.rules.evaluate(&self.current, &imported)
    }
}
