//! Integration test: rule string → engine → violation records.
//!
//! Exercises the public API the way a host traversal would: one session per
//! file, one call per import statement.

use import_fence_core::{
    ImportRestriction, ModulePath, ParsePolicy, RestrictionConfig, RuleSet, ViolationRecord,
};

fn engine(spec: &str) -> ImportRestriction {
    ImportRestriction::new(RuleSet::parse(spec).expect("rules should parse"))
}

fn imported(records: &[ViolationRecord]) -> Vec<&str> {
    records.iter().map(|r| r.imported.as_str()).collect()
}

#[test]
fn prefix_match_yields_one_violation() {
    let engine = engine("module.* -> .*restricted.*");
    let session = engine.enter_module("module.under.test");

    let records = session.on_import(&["restricted_one"]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].imported.as_str(), "restricted_one");
    assert_eq!(records[0].importer.as_str(), "module.under.test");
    assert_eq!(records[0].rule_index, 0);
}

#[test]
fn unrelated_import_yields_nothing() {
    let engine = engine("module.* -> .*restricted.*");
    let session = engine.enter_module("module.under.test");
    assert!(session.on_import(&["free_valid_module"]).is_empty());
}

#[test]
fn relative_from_import_depth_one() {
    let engine = engine("module.* -> .*restricted.*");
    let session = engine.enter_module("module.under.test");
    let records = session.on_from_import("restricted", 1, &["some_module"]);
    assert_eq!(imported(&records), vec!["module.under.restricted.some_module"]);
}

#[test]
fn relative_from_import_depth_two() {
    let engine = engine("module.* -> .*restricted.*");
    let session = engine.enter_module("module.under.test");
    let records = session.on_from_import("restricted", 2, &["some_module"]);
    assert_eq!(imported(&records), vec!["module.restricted.some_module"]);
}

#[test]
fn each_from_import_name_is_checked() {
    let engine = engine("module.* -> .*restricted.*");
    let session = engine.enter_module("module.under.test");
    let records = session.on_from_import("restricted", 0, &["a", "b"]);
    assert_eq!(imported(&records), vec!["restricted.a", "restricted.b"]);
}

#[test]
fn empty_configuration_never_reports() {
    let engine = engine("");
    for (importer, import) in [
        ("module.under.test", "restricted_one"),
        ("a", "b"),
        ("", ""),
    ] {
        assert!(engine
            .check_import(&ModulePath::new(importer), &[import])
            .is_empty());
    }
}

#[test]
fn matching_several_rules_accumulates() {
    let engine = engine("app.* -> legacy, app.domain -> legacy.orm");
    let records = engine.check_import(&ModulePath::new("app.domain.user"), &["legacy.orm.session"]);
    let rules: Vec<usize> = records.iter().map(|r| r.rule_index).collect();
    assert_eq!(rules, vec![0, 1]);
}

#[test]
fn explicit_importer_needs_no_prior_state() {
    let engine = engine("module.* -> .*restricted.*");
    // Interleaved files: each call names its own importer.
    let a = engine.check_import(&ModulePath::new("module.a"), &["restricted"]);
    let b = engine.check_import(&ModulePath::new("elsewhere"), &["restricted"]);
    let c = engine.check_import(&ModulePath::new("module.c"), &["restricted"]);
    assert_eq!(a.len(), 1);
    assert!(b.is_empty());
    assert_eq!(c[0].importer.as_str(), "module.c");
}

#[test]
fn sessions_can_run_on_separate_threads() {
    let engine = engine("module.* -> .*restricted.*");
    std::thread::scope(|scope| {
        let handles: Vec<_> = ["module.one", "other.two", "module.three"]
            .into_iter()
            .map(|name| {
                let engine = &engine;
                scope.spawn(move || engine.enter_module(name).on_import(&["restricted"]).len())
            })
            .collect();
        let counts: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        assert_eq!(counts, vec![1, 0, 1]);
    });
}

#[test]
fn strict_configuration_surfaces_malformed_rules() {
    let config = RestrictionConfig {
        rules: "module.* -> restricted, oops".into(),
        policy: ParsePolicy::Strict,
        ..RestrictionConfig::default()
    };
    let err = ImportRestriction::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("oops"));
}
