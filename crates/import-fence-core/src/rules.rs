//! Restriction rules: parsing the compact rule string and evaluating import edges.
//!
//! A rule string is a comma-separated list of `HOST -> RESTRICTED` pairs,
//! each side a regular expression matched against the start of a dotted
//! module path:
//!
//! ```text
//! app.domain.* -> app.infra.*, app.* -> legacy
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::path::ModulePath;
use crate::types::ViolationRecord;

/// Separator between rules.
pub const RULE_SEPARATOR: char = ',';

/// Separator between the host and restricted side of a rule.
pub const PAIR_SEPARATOR: &str = "->";

/// How to treat a segment that is not a `HOST -> RESTRICTED` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Drop the segment and keep parsing.
    #[default]
    Lenient,
    /// Fail with [`RuleSetError::MalformedSegment`].
    Strict,
}

/// Errors from building a [`RuleSet`].
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    /// A segment did not split into exactly two parts (strict policy only).
    #[error("rule segment {index}: `{segment}` is not of the form `HOST -> RESTRICTED`")]
    MalformedSegment {
        /// Zero-based position of the segment in the rule string.
        index: usize,
        /// The offending segment text.
        segment: String,
    },

    /// A pattern is not a valid regular expression.
    #[error("rule segment {index}: invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Zero-based position of the segment in the rule string.
        index: usize,
        /// The pattern text after trimming.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// A regular expression that matches at the start of its input.
///
/// Compiled once at construction and reused for all match calls.
#[derive(Debug, Clone)]
pub struct PrefixPattern {
    raw: String,
    compiled: Regex,
}

impl PrefixPattern {
    /// Compiles a prefix pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` is not a valid expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        // Unwrapped first: `a)|(b` must not balance inside `^(?:..)`.
        Regex::new(pattern)?;
        let compiled = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests whether `candidate` begins with a match.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.compiled.is_match(candidate)
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for PrefixPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PrefixPattern {}

/// "Modules matching `host` may not import modules matching `restricted`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    index: usize,
    host: PrefixPattern,
    restricted: PrefixPattern,
}

impl Rule {
    /// Creates a rule at the given position of its rule set.
    #[must_use]
    pub fn new(index: usize, host: PrefixPattern, restricted: PrefixPattern) -> Self {
        Self {
            index,
            host,
            restricted,
        }
    }

    /// Position of this rule in its rule set.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pattern selecting the importing modules this rule governs.
    #[must_use]
    pub fn host(&self) -> &PrefixPattern {
        &self.host
    }

    /// Pattern selecting the modules those importers may not use.
    #[must_use]
    pub fn restricted(&self) -> &PrefixPattern {
        &self.restricted
    }

    /// Whether the rule governs imports made by `importer`.
    #[must_use]
    pub fn applies_to(&self, importer: &ModulePath) -> bool {
        self.host.matches(importer.as_str())
    }

    /// Whether `imported` is forbidden by this rule.
    #[must_use]
    pub fn forbids(&self, imported: &ModulePath) -> bool {
        self.restricted.matches(imported.as_str())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {PAIR_SEPARATOR} {}",
            self.host.as_str(),
            self.restricted.as_str()
        )
    }
}

/// An ordered, immutable list of restriction rules.
///
/// Built in one shot from a rule string; every call to [`RuleSet::parse`]
/// returns a fresh value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// A rule set that never reports anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a rule string with the [`ParsePolicy::Lenient`] policy.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::InvalidPattern`] if any pattern fails to compile.
    pub fn parse(spec: &str) -> Result<Self, RuleSetError> {
        Self::parse_with(spec, ParsePolicy::Lenient)
    }

    /// Parses a rule string.
    ///
    /// Segments are split on `,` and then on `->`; both sides are trimmed and
    /// compiled as prefix patterns. Blank segments are skipped under either
    /// policy, so `""` and trailing commas are valid. Order and duplicates
    /// are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::InvalidPattern`] if any pattern fails to compile,
    /// and [`RuleSetError::MalformedSegment`] for a malformed segment under
    /// [`ParsePolicy::Strict`].
    pub fn parse_with(spec: &str, policy: ParsePolicy) -> Result<Self, RuleSetError> {
        let mut rules = Vec::new();

        for (index, segment) in spec.split(RULE_SEPARATOR).enumerate() {
            if segment.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = segment.split(PAIR_SEPARATOR).collect();
            let [host, restricted] = parts.as_slice() else {
                match policy {
                    ParsePolicy::Lenient => {
                        debug!(index, segment, "dropping malformed restriction segment");
                        continue;
                    }
                    ParsePolicy::Strict => {
                        return Err(RuleSetError::MalformedSegment {
                            index,
                            segment: segment.trim().to_string(),
                        });
                    }
                }
            };

            let compile = |pattern: &str| {
                PrefixPattern::new(pattern).map_err(|source| RuleSetError::InvalidPattern {
                    index,
                    pattern: pattern.to_string(),
                    source,
                })
            };
            let host = compile(host.trim())?;
            let restricted = compile(restricted.trim())?;

            rules.push(Rule::new(rules.len(), host, restricted));
        }

        debug!(count = rules.len(), "parsed restriction rules");
        Ok(Self { rules })
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Iterates over the rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Rules whose host pattern matches `importer`.
    pub fn applicable<'a>(&'a self, importer: &'a ModulePath) -> impl Iterator<Item = &'a Rule> {
        self.rules.iter().filter(move |r| r.applies_to(importer))
    }

    /// Evaluates one import edge against every rule.
    ///
    /// Each rule whose host pattern matches `importer` and whose restricted
    /// pattern matches `imported` contributes one record, in rule order.
    #[must_use]
    pub fn evaluate(&self, importer: &ModulePath, imported: &ModulePath) -> Vec<ViolationRecord> {
        self.applicable(importer)
            .filter(|rule| rule.forbids(imported))
            .map(|rule| ViolationRecord::new(imported.clone(), importer.clone(), rule.index()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ModulePath {
        ModulePath::new(s)
    }

    #[test]
    fn parses_single_rule() {
        let rules = RuleSet::parse("module.* -> .*restricted.*").unwrap();
        assert_eq!(rules.len(), 1);
        let rule = rules.get(0).unwrap();
        assert_eq!(rule.host().as_str(), "module.*");
        assert_eq!(rule.restricted().as_str(), ".*restricted.*");
        assert_eq!(rule.to_string(), "module.* -> .*restricted.*");
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let rules = RuleSet::parse("a -> b, c -> d, a -> b").unwrap();
        let rendered: Vec<String> = rules.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["a -> b", "c -> d", "a -> b"]);
        let indices: Vec<usize> = rules.iter().map(Rule::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn empty_string_yields_empty_rule_set() {
        let rules = RuleSet::parse("").unwrap();
        assert!(rules.is_empty());
        assert!(rules.evaluate(&path("anything"), &path("at.all")).is_empty());
    }

    #[test]
    fn lenient_policy_drops_malformed_segments() {
        let rules = RuleSet::parse("no arrow here, a -> b -> c, x -> y").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get(0).unwrap().to_string(), "x -> y");
        assert_eq!(rules.get(0).unwrap().index(), 0);
    }

    #[test]
    fn strict_policy_rejects_malformed_segments() {
        let err = RuleSet::parse_with("x -> y, a -> b -> c", ParsePolicy::Strict).unwrap_err();
        match err {
            RuleSetError::MalformedSegment { index, segment } => {
                assert_eq!(index, 1);
                assert_eq!(segment, "a -> b -> c");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_policy_accepts_blank_segments() {
        let rules = RuleSet::parse_with(" , x -> y,", ParsePolicy::Strict).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(RuleSet::parse_with("", ParsePolicy::Strict)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn invalid_regex_is_fatal() {
        let err = RuleSet::parse("ok -> fine, app -> (unclosed").unwrap_err();
        match err {
            RuleSetError::InvalidPattern { index, pattern, .. } => {
                assert_eq!(index, 1);
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unbalanced_group_cannot_escape_anchor() {
        assert!(PrefixPattern::new("a)|(b").is_err());
    }

    #[test]
    fn prefix_match_not_full_match() {
        let p = PrefixPattern::new("app.domain").unwrap();
        assert!(p.matches("app.domain"));
        assert!(p.matches("app.domain.model"));
        assert!(p.matches("app.domains"));
        assert!(!p.matches("my.app.domain"));
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        let p = PrefixPattern::new("foo|bar").unwrap();
        assert!(p.matches("bar.baz"));
        assert!(!p.matches("xbar"));
    }

    #[test]
    fn empty_pattern_matches_everything() {
        let rules = RuleSet::parse(" -> legacy").unwrap();
        assert_eq!(rules.evaluate(&path("any.module"), &path("legacy.x")).len(), 1);
    }

    #[test]
    fn evaluate_reports_prefix_matches() {
        let rules = RuleSet::parse("module.* -> .*restricted.*").unwrap();
        let records = rules.evaluate(&path("module.under.test"), &path("restricted_one"));
        assert_eq!(
            records,
            vec![ViolationRecord::new(
                path("restricted_one"),
                path("module.under.test"),
                0
            )]
        );
    }

    #[test]
    fn evaluate_ignores_unrelated_imports() {
        let rules = RuleSet::parse("module.* -> .*restricted.*").unwrap();
        assert!(rules
            .evaluate(&path("module.under.test"), &path("free_valid_module"))
            .is_empty());
    }

    #[test]
    fn evaluate_ignores_unrelated_importers() {
        let rules = RuleSet::parse("module.* -> .*restricted.*").unwrap();
        assert!(rules
            .evaluate(&path("other.pkg"), &path("restricted_one"))
            .is_empty());
    }

    #[test]
    fn evaluate_accumulates_across_rules() {
        let rules = RuleSet::parse("app -> legacy, app.domain -> legacy.db, web -> legacy").unwrap();
        let records = rules.evaluate(&path("app.domain.model"), &path("legacy.db.session"));
        let indices: Vec<usize> = records.iter().map(|r| r.rule_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn duplicate_rules_report_twice() {
        let rules = RuleSet::parse("a -> b, a -> b").unwrap();
        assert_eq!(rules.evaluate(&path("a"), &path("b")).len(), 2);
    }

    #[test]
    fn reparsing_is_idempotent() {
        let spec = "module.* -> .*restricted.*, app -> legacy, broken";
        let first = RuleSet::parse(spec).unwrap();
        let second = RuleSet::parse(spec).unwrap();
        assert_eq!(first, second);

        let pairs = [
            ("module.under.test", "restricted_one"),
            ("app.x", "legacy.y"),
            ("app.x", "modern"),
            ("other", "restricted"),
        ];
        for (importer, imported) in pairs {
            assert_eq!(
                first.evaluate(&path(importer), &path(imported)),
                second.evaluate(&path(importer), &path(imported))
            );
        }
    }

    #[test]
    fn applicable_filters_by_host() {
        let rules = RuleSet::parse("app -> x, web -> y, app.api -> z").unwrap();
        let importer = path("app.api.routes");
        let indices: Vec<usize> = rules.applicable(&importer).map(Rule::index).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
