//! Subcommand implementations.

use anyhow::Result;
use import_fence_core::{Config, ParsePolicy};
use std::path::Path;

use crate::RestrictionArgs;

pub mod check;
pub mod explain;
pub mod init;
pub mod output;

/// Loads the configuration for `project_dir` and applies command-line overrides.
pub fn load_config(
    project_dir: &Path,
    explicit: Option<&Path>,
    overrides: &RestrictionArgs,
) -> Result<Config> {
    let (mut config, _source) = crate::config_resolver::load(project_dir, explicit)?;
    apply_overrides(&mut config, overrides);
    Ok(config)
}

fn apply_overrides(config: &mut Config, overrides: &RestrictionArgs) {
    if let Some(rules) = &overrides.restrictions {
        tracing::debug!("Restriction rules overridden from the command line");
        config.restriction.rules.clone_from(rules);
    }
    if overrides.strict {
        config.restriction.policy = ParsePolicy::Strict;
    }
}
