//! Common fixtures for isoftrepo integration tests
//!
//! Every test gets its own temporary directory holding a catalog snapshot,
//! a template directory and a server configuration pointing at it.

// Not every test file uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use isoftrepo::config::ServerConfig;
use isoftrepo::test_utils::{TemplateFixture, sample_catalog_tree};

/// Isolated on-disk setup for running the binary.
pub struct TestEnvironment {
    temp_dir: TempDir,
    pub catalog_path: PathBuf,
    pub templates_dir: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    /// Sample catalog, basic templates and a config using both.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let catalog_path = temp_dir.path().join("catalog.json");
        let templates_dir = temp_dir.path().join("templates");
        let config_path = temp_dir.path().join("config.toml");

        let catalog = serde_json::to_string_pretty(&sample_catalog_tree())?;
        fs::write(&catalog_path, catalog).context("Failed to write catalog snapshot")?;

        TemplateFixture::basic().write_to(&templates_dir)?;

        let mut config = ServerConfig::default();
        config.server.templates = templates_dir.display().to_string();
        config.ams.name = "test-bundle".to_string();
        fs::write(&config_path, toml::to_string(&config)?).context("Failed to write config")?;

        Ok(Self {
            temp_dir,
            catalog_path,
            templates_dir,
            config_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The binary, isolated from the user's environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("isoftrepo").unwrap();
        cmd.env("ISOFTREPO_CONFIG", &self.config_path)
            .env("HOME", self.temp_dir.path())
            .env_remove("RUST_LOG");
        cmd
    }

    /// `render --catalog <snapshot>` with extra arguments.
    pub fn render(&self, args: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.arg("render").arg("--catalog").arg(&self.catalog_path).args(args);
        cmd
    }
}
