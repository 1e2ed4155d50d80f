//! # import-fence-core
//!
//! Dependency-boundary enforcement over dotted module paths.
//!
//! Given rules of the form "modules matching X may not import modules
//! matching Y", this crate decides which import edges violate them. It is
//! host-agnostic: callers supply the importing module's path and the raw
//! import specifiers, and receive [`ViolationRecord`]s back.
//!
//! - [`RuleSet`] parses the compact `HOST -> RESTRICTED, ...` rule string
//! - [`normalize`] resolves relative specifiers like `..pkg.mod`
//! - [`RuleSet::evaluate`] checks one edge against every rule
//! - [`ImportRestriction`] and [`ModuleSession`] drive per-statement checks
//!
//! ## Example
//!
//! ```
//! use import_fence_core::{ImportRestriction, RuleSet};
//!
//! let rules = RuleSet::parse("app.domain -> app.infra")?;
//! let engine = ImportRestriction::new(rules);
//!
//! let session = engine.enter_module("app.domain.model");
//! let records = session.on_from_import("infra", 2, &["db"]);
//! assert_eq!(records[0].imported.as_str(), "app.infra.db");
//! # Ok::<(), import_fence_core::RuleSetError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod engine;
mod path;
mod rules;
mod types;

pub use config::{AnalyzerConfig, Config, ConfigError, RestrictionConfig};
pub use context::ModuleSession;
pub use engine::ImportRestriction;
pub use path::{from_import_target, normalize, relative_depth, ModulePath};
pub use rules::{
    ParsePolicy, PrefixPattern, Rule, RuleSet, RuleSetError, PAIR_SEPARATOR, RULE_SEPARATOR,
};
pub use types::{LintResult, Location, Severity, Violation, ViolationRecord};
