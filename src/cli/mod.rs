//! Command-line interface for modlens.
//!
//! Each subcommand lives in its own module with its own argument
//! structure and execution logic:
//!
//! - `tree`   - build and display the include dependency tree of an
//!   archive
//! - `errors` - attribute a diagnostic transcript to source files
//! - `graph`  - project one archive into flat node/edge graph data with
//!   cycle detection
//!
//! Global flags control verbosity (`--verbose`/`--quiet`) and the
//! configuration file (`--config`). Logging goes to stderr so JSON
//! output on stdout stays machine-readable.

pub mod errors;
pub mod graph;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::ModlensConfig;

/// Runtime configuration derived from global CLI flags.
///
/// Kept separate from the parsed arguments so tests can inject a
/// configuration without going through flag parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level filter; `None` preserves `RUST_LOG`.
    pub log_level: Option<String>,
    /// Explicit configuration file path.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Initialize the tracing subscriber, once. Safe to call twice (the
    /// second init is ignored), which keeps in-process CLI tests simple.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level.clone()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Load the project configuration honoring `--config`.
    pub fn load_config(&self) -> Result<ModlensConfig> {
        match &self.config_path {
            Some(path) => ModlensConfig::load_from(path),
            None => ModlensConfig::load_default(),
        }
    }
}

/// Top-level CLI: dependency and diagnostic analysis for Lua mod
/// archives.
#[derive(Parser)]
#[command(
    name = "modlens",
    about = "Dependency and diagnostic analysis for Lua mod archives",
    version,
    long_about = "modlens turns a mod archive and the raw transcript of an external \
                  analyzer run into navigable models: per-file error locations and a \
                  cycle-safe include dependency tree."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a configuration file (default: ./modlens.toml if present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Build and display the include dependency tree of an archive.
    Tree(tree::TreeCommand),

    /// Attribute a diagnostic transcript's errors to source files.
    Errors(errors::ErrorsCommand),

    /// Project an archive into flat graph data and report cycles.
    Graph(graph::GraphCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an injected configuration (used by tests).
    pub async fn execute_with_config(self, cli_config: CliConfig) -> Result<()> {
        cli_config.init_logging();
        let config = cli_config.load_config()?;

        match self.command {
            Commands::Tree(cmd) => cmd.execute(&config).await,
            Commands::Errors(cmd) => cmd.execute(&config).await,
            Commands::Graph(cmd) => cmd.execute(&config).await,
        }
    }
}
