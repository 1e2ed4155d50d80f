//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# import-fence configuration

[analyzer]
# Source root: module paths are computed from file paths below this directory,
# e.g. `app/domain/model.py` is the module `app.domain.model`.
root = "."
exclude = ["**/.venv/**", "**/venv/**", "**/__pycache__/**", "**/build/**"]
respect_gitignore = true

[restriction]
# Comma-separated `HOST -> RESTRICTED` pairs. Both sides are regular
# expressions matched against the start of a dotted module path.
# Modules matching HOST may not import modules matching RESTRICTED.
rules = "app\\.domain -> app\\.infra, app\\.domain -> app\\.api"

# "lenient" ignores segments that are not `HOST -> RESTRICTED` pairs;
# "strict" reports them as configuration errors.
policy = "lenient"

# Severity of each violation, and the level that fails the run.
severity = "error"
fail_on = "error"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("import-fence.toml");
    write_template(config_path, force)?;

    println!("Created import-fence.toml");
    println!();
    println!("Next steps:");
    println!("  1. Edit [restriction] rules for your project");
    println!("  2. Run: import-fence explain");
    println!("  3. Run: import-fence check");

    Ok(())
}

fn write_template(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, CONFIG_TEMPLATE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use import_fence_core::{Config, ImportRestriction, ParsePolicy};
    use tempfile::TempDir;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.restriction.policy, ParsePolicy::Lenient);
        let engine = ImportRestriction::from_config(&config.restriction).unwrap();
        assert_eq!(engine.rules().len(), 2);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("import-fence.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_template(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_template(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }
}
