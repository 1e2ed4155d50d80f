//! The import-restriction checker.

use crate::config::RestrictionConfig;
use crate::context::ModuleSession;
use crate::path::ModulePath;
use crate::rules::{RuleSet, RuleSetError};
use crate::types::ViolationRecord;

/// Checks import edges against a parsed [`RuleSet`].
///
/// The engine holds only the immutable rule set. The importing module is
/// supplied per call, or fixed once per file through [`enter_module`](Self::enter_module).
#[derive(Debug, Clone, Default)]
pub struct ImportRestriction {
    rules: RuleSet,
}

impl ImportRestriction {
    /// Diagnostic code for restricted imports.
    pub const CODE: &'static str = "E7101";

    /// Kebab-case rule name.
    pub const NAME: &'static str = "import-restriction";

    /// Brief description of what the rule checks.
    pub const DESCRIPTION: &'static str = "Only allowed modules can be imported.";

    /// Creates an engine from a parsed rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Parses the configured rule string with the configured policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule string fails to parse.
    pub fn from_config(config: &RestrictionConfig) -> Result<Self, RuleSetError> {
        RuleSet::parse_with(&config.rules, config.policy).map(Self::new)
    }

    /// The rules this engine enforces.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Starts checking a new source file whose module is `module`.
    #[must_use]
    pub fn enter_module(&self, module: impl Into<ModulePath>) -> ModuleSession<'_> {
        ModuleSession::new(&self.rules, module.into())
    }

    /// Checks an `import` statement made by `importer`.
    #[must_use]
    pub fn check_import<S: AsRef<str>>(
        &self,
        importer: &ModulePath,
        names: &[S],
    ) -> Vec<ViolationRecord> {
        self.enter_module(importer.clone()).on_import(names)
    }

    /// Checks a `from <module> import ...` statement made by `importer`.
    #[must_use]
    pub fn check_from_import<S: AsRef<str>>(
        &self,
        importer: &ModulePath,
        module: &str,
        level: usize,
        names: &[S],
    ) -> Vec<ViolationRecord> {
        self.enter_module(importer.clone())
            .on_from_import(module, level, names)
    }

    /// Help text naming the rule behind a record.
    #[must_use]
    pub fn explain(&self, record: &ViolationRecord) -> Option<String> {
        self.rules
            .get(record.rule_index)
            .map(|rule| format!("restricted by rule #{}: {rule}", rule.index()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ParsePolicy;

    fn engine() -> ImportRestriction {
        ImportRestriction::new(RuleSet::parse("module.* -> .*restricted.*").unwrap())
    }

    fn importer() -> ModulePath {
        ModulePath::new("module.under.test")
    }

    #[test]
    fn import_restriction() {
        let records = engine().check_import(&importer(), &["restricted_one"]);
        assert_eq!(
            records,
            vec![ViolationRecord::new(
                ModulePath::new("restricted_one"),
                importer(),
                0
            )]
        );
    }

    #[test]
    fn from_import_restriction() {
        let records = engine().check_from_import(&importer(), "restricted", 0, &["module"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].imported.as_str(), "restricted.module");
    }

    #[test]
    fn from_relative_import_restriction() {
        let records = engine().check_from_import(&importer(), "restricted", 2, &["some_module"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].imported.as_str(), "module.restricted.some_module");
    }

    #[test]
    fn bare_relative_from_import_restriction() {
        let rules = RuleSet::parse("module -> module\\.restricted_x").unwrap();
        let engine = ImportRestriction::new(rules);
        let records = engine.check_from_import(&importer(), "", 1, &["restricted_x"]);
        let imported: Vec<&str> = records.iter().map(|r| r.imported.as_str()).collect();
        assert_eq!(imported, vec!["module.restricted_x"]);
    }

    #[test]
    fn import_non_restriction() {
        assert!(engine()
            .check_import(&importer(), &["non_valid_module"])
            .is_empty());
    }

    #[test]
    fn free_module() {
        assert!(engine()
            .check_import(&importer(), &["free_valid_module"])
            .is_empty());
    }

    #[test]
    fn sessions_are_independent() {
        let engine = engine();
        let restricted = engine.enter_module("module.under.test");
        let free = engine.enter_module("elsewhere");
        assert_eq!(restricted.on_import(&["restricted_one"]).len(), 1);
        assert!(free.on_import(&["restricted_one"]).is_empty());
        assert_eq!(restricted.current_module().as_str(), "module.under.test");
    }

    #[test]
    fn from_config_honours_policy() {
        let mut config = RestrictionConfig {
            rules: "a -> b, broken".into(),
            ..RestrictionConfig::default()
        };
        assert_eq!(ImportRestriction::from_config(&config).unwrap().rules().len(), 1);

        config.policy = ParsePolicy::Strict;
        assert!(ImportRestriction::from_config(&config).is_err());
    }

    #[test]
    fn explain_names_matched_rule() {
        let engine = engine();
        let records = engine.check_import(&importer(), &["restricted_one"]);
        assert_eq!(
            engine.explain(&records[0]).as_deref(),
            Some("restricted by rule #0: module.* -> .*restricted.*")
        );
    }

    #[test]
    fn default_engine_reports_nothing() {
        assert!(ImportRestriction::default()
            .check_import(&importer(), &["restricted_one"])
            .is_empty());
    }
}
