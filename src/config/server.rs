//! Server configuration (`config.toml`).
//!
//! ```toml
//! [server]
//! port = 32696
//! templates = "~/isoftrepo/templates"
//! recent_version_limit = 5
//!
//! [ams]
//! name = "production"
//! path = "/software/ams/bundles"
//!
//! [monitoring]
//! html = "<iframe src=\"https://monitor.example.org/\"></iframe>"
//! ```
//!
//! Every section and key is optional; missing values fall back to the
//! defaults in [`crate::constants`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_PORT, DEFAULT_RECENT_VERSION_LIMIT, DEFAULT_TEMPLATE_DIR,
};
use crate::core::RepoError;

/// Complete server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// `[server]` section: listener and page settings.
    #[serde(default)]
    pub server: ServerSection,

    /// `[ams]` section: which module bundle the catalog snapshot describes.
    #[serde(default)]
    pub ams: BundleSection,

    /// `[monitoring]` section: optional markup embedded into every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<MonitoringSection>,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSection {
    /// FastCGI port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the page templates. `~` is expanded.
    #[serde(default = "default_templates")]
    pub templates: String,

    /// Distinct versions ranked within this limit are shown as recent.
    #[serde(default = "default_recent_version_limit")]
    pub recent_version_limit: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            templates: default_templates(),
            recent_version_limit: default_recent_version_limit(),
        }
    }
}

/// `[ams]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BundleSection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

/// `[monitoring]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MonitoringSection {
    /// Raw markup published as the `MONITORING` field.
    #[serde(default)]
    pub html: String,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_templates() -> String {
    DEFAULT_TEMPLATE_DIR.to_string()
}

const fn default_recent_version_limit() -> usize {
    DEFAULT_RECENT_VERSION_LIMIT
}

impl ServerConfig {
    /// Load the configuration from an explicit path, the `ISOFTREPO_CONFIG`
    /// environment variable, or the default location, in that order.
    ///
    /// An explicit path must exist. When the path comes from the environment
    /// or the default location and the file is missing, defaults are used.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(RepoError::ConfigNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            return Self::load_from(&path).await;
        }

        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(value) if !value.is_empty() => PathBuf::from(shellexpand::tilde(&value).as_ref()),
            _ => Self::default_path()?,
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No server config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load the configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read server config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse server config from {}", path.display()))?;
        config.validate()?;

        tracing::debug!(
            port = config.server.port,
            templates = %config.server.templates,
            bundle = %config.ams.name,
            "Loaded server config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Default configuration path: `~/.isoftrepo/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
        Ok(home.join(".isoftrepo").join("config.toml"))
    }

    /// Template directory with `~` expanded.
    pub fn template_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.server.templates).as_ref())
    }

    /// Monitoring markup, if configured and non-empty.
    pub fn monitoring_html(&self) -> Option<&str> {
        self.monitoring.as_ref().map(|m| m.html.as_str()).filter(|h| !h.is_empty())
    }

    fn validate(&self) -> Result<(), RepoError> {
        if self.server.port == 0 {
            return Err(RepoError::ConfigError {
                message: "[server] port must be non-zero".to_string(),
            });
        }
        if self.server.templates.trim().is_empty() {
            return Err(RepoError::ConfigError {
                message: "[server] templates must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
