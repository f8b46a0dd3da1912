//! Test utilities for isoftrepo
//!
//! Shared helpers for unit and integration tests: logging setup, a sample
//! catalog and a minimal template set.
//!
//! # Example
//!
//! ```rust,no_run
//! use isoftrepo::catalog::Catalog;
//! use isoftrepo::test_utils::fixtures::sample_catalog;
//!
//! let catalog = sample_catalog();
//! assert!(catalog.module("gromacs").is_some());
//! ```

pub mod fixtures;

pub use fixtures::{TemplateFixture, sample_catalog, sample_catalog_tree};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `None` the `RUST_LOG` environment
/// variable decides; without it, tests run silently.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
