//! Configuration management for isoftrepo
//!
//! Two kinds of input feed the repository browser:
//!
//! 1. **Server configuration** (`~/.isoftrepo/config.toml`, TOML) - port,
//!    template directory, module bundle and the recent-version threshold.
//!    See [`ServerConfig`].
//! 2. **Catalog tree** - the module catalog as an immutable labeled tree
//!    ([`ConfigNode`]), read from a JSON snapshot.
//!
//! # Configuration Priority
//!
//! 1. `--config` command-line flag
//! 2. `ISOFTREPO_CONFIG` environment variable
//! 3. `~/.isoftrepo/config.toml`
//! 4. Built-in defaults from [`crate::constants`]
//!
//! # Modules
//!
//! - `server` - Server configuration sections and loading
//! - `tree` - The read-only catalog tree

mod server;
mod tree;

pub use server::{BundleSection, MonitoringSection, ServerConfig, ServerSection};
pub use tree::ConfigNode;
