//! Explain command: shows which rules were parsed from the configuration.

use anyhow::{Context, Result};
use import_fence_core::{Config, ImportRestriction, RuleSet, RULE_SEPARATOR};

/// Runs the explain command.
pub fn run(config: &Config) -> Result<()> {
    let engine = ImportRestriction::from_config(&config.restriction)
        .context("Invalid restriction rules")?;

    print!("{}", render(&config.restriction.rules, engine.rules()));
    Ok(())
}

/// Renders the parsed rule table plus a note about dropped segments.
fn render(spec: &str, rules: &RuleSet) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if rules.is_empty() {
        let _ = writeln!(out, "No restriction rules: every import is allowed.");
    } else {
        let _ = writeln!(out, "{:<4} {:<30} May not import", "#", "Module");
        let _ = writeln!(out, "{}", "-".repeat(64));
        for rule in rules {
            let _ = writeln!(
                out,
                "{:<4} {:<30} {}",
                rule.index(),
                rule.host().as_str(),
                rule.restricted().as_str()
            );
        }
    }

    let dropped = segment_count(spec).saturating_sub(rules.len());
    if dropped > 0 {
        let _ = writeln!(
            out,
            "\n{dropped} segment(s) ignored: expected `HOST -> RESTRICTED` (use --strict to reject)"
        );
    }
    out
}

fn segment_count(spec: &str) -> usize {
    spec.split(RULE_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}
