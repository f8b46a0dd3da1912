//! Command-line interface for isoftrepo.
//!
//! # Commands
//!
//! - `render` - Assemble one page from a catalog snapshot and render it
//! - `config` - Show, locate or initialize the server configuration
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only log errors
//! - `--config <path>` - Server configuration file
//!
//! Logs go to stderr; rendered pages go to stdout.
//!
//! ```bash
//! isoftrepo --verbose render --catalog catalog.json --action module --module cp2k
//! isoftrepo --config /etc/isoftrepo.toml config show
//! ```

pub mod config;
pub mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,
    /// Explicit server configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the flag-derived level. Calling this
    /// more than once keeps the first subscriber.
    pub fn init_logging(&self) {
        let filter = match std::env::var("RUST_LOG") {
            Ok(value) if !value.is_empty() => EnvFilter::new(value),
            _ => EnvFilter::new(self.log_level.as_deref().unwrap_or("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr) // stdout carries the rendered page
            .try_init();
    }
}

/// Main CLI structure for isoftrepo.
#[derive(Parser, Debug)]
#[command(
    name = "isoftrepo",
    about = "Software repository browser - render module catalog pages",
    version,
    long_about = "Projects an AMS module catalog snapshot into page contexts and renders them through HTML templates."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the server configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a page from a catalog snapshot
    Render(render::RenderCommand),

    /// Show or initialize the server configuration
    Config(config::ConfigCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags.
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

    pub async fn execute_with_config(self, cli_config: CliConfig) -> Result<()> {
        cli_config.init_logging();

        let server_config = ServerConfig::load_with_optional(cli_config.config_path.clone()).await?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&server_config).await,
            Commands::Config(cmd) => cmd.execute(&server_config, cli_config.config_path.as_deref()).await,
        }
    }
}
