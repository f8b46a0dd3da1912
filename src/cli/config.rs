//! Inspect and initialize the server configuration.
//!
//! ```bash
//! isoftrepo config            # print the effective configuration
//! isoftrepo config show       # same
//! isoftrepo config path       # where the configuration is read from
//! isoftrepo config init       # write a default config.toml
//! ```
//!
//! The effective configuration is what `render` would use: the file given by
//! `--config`, `ISOFTREPO_CONFIG` or `~/.isoftrepo/config.toml`, with every
//! missing key filled from the defaults.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::ServerConfig;
use crate::constants::CONFIG_PATH_ENV;

/// Command to inspect the server configuration.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Print the effective configuration as TOML (default).
    Show,

    /// Print the configuration file path.
    Path,

    /// Write a configuration file with default values.
    ///
    /// Refuses to overwrite an existing file unless `--force` is given.
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub async fn execute(self, config: &ServerConfig, explicit_path: Option<&Path>) -> Result<()> {
        match self.command {
            None | Some(ConfigSubcommands::Show) => show(config),
            Some(ConfigSubcommands::Path) => {
                println!("{}", config_path(explicit_path)?.display());
                Ok(())
            }
            Some(ConfigSubcommands::Init {
                force,
            }) => init(&config_path(explicit_path)?, force).await,
        }
    }
}

fn show(config: &ServerConfig) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    print!("{content}");
    Ok(())
}

/// Path the configuration is read from, in lookup order.
fn config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(path.to_path_buf());
    }
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(value) if !value.is_empty() => Ok(PathBuf::from(shellexpand::tilde(&value).as_ref())),
        _ => ServerConfig::default_path(),
    }
}

async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists: {}\nUse --force to overwrite it",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&ServerConfig::default())
        .context("Failed to serialize default configuration")?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write configuration: {}", path.display()))?;

    println!("{} Created {}", "✓".green(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_writes_loadable_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        init(&path, false).await.unwrap();
        let loaded = ServerConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, ServerConfig::default());

        assert!(init(&path, false).await.is_err());
        init(&path, true).await.unwrap();
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = config_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }
}
