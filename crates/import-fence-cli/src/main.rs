//! import-fence CLI tool.
//!
//! Usage:
//! ```bash
//! import-fence check [OPTIONS] [PATH]
//! import-fence explain [--restrictions RULES]
//! import-fence init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Dependency boundary linter for Python packages
#[derive(Parser)]
#[command(name = "import-fence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check imports against the restriction rules
    Check {
        /// Project directory to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        #[command(flatten)]
        overrides: RestrictionArgs,
    },

    /// Show how the restriction rules are parsed
    Explain {
        /// Project directory used to find the configuration
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        overrides: RestrictionArgs,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Command-line overrides for the `[restriction]` config section.
#[derive(Debug, Default, clap::Args)]
pub struct RestrictionArgs {
    /// Rules as `HOST -> RESTRICTED, ...` (overrides the config file)
    #[arg(long, env = "IMPORT_FENCE_RESTRICTIONS")]
    restrictions: Option<String>,

    /// Reject malformed rule segments instead of ignoring them
    #[arg(long)]
    strict: bool,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            overrides,
        } => {
            let config = commands::load_config(&path, cli.config.as_deref(), &overrides)?;
            commands::check::run(&path, format, exclude, &config)
        }
        Commands::Explain { path, overrides } => {
            let config = commands::load_config(&path, cli.config.as_deref(), &overrides)?;
            commands::explain::run(&config)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
