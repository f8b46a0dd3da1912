//! isoftrepo - software repository browser
//!
//! Projects an AMS module catalog (modules, versions, architecture/mode
//! qualified builds) into page contexts for HTML templates. The engine is
//! synchronous and deterministic: one request selects a page assembler, the
//! assembler reads an immutable catalog snapshot and produces one finished
//! context tree, and a renderer turns that tree into a page.
//!
//! # Architecture Overview
//!
//! ```text
//! request ──► pages::dispatch ──► page assembler ──► ContextBuilder ──► RenderContext ──► PageRenderer
//!                                      │
//!                                      ├── models::ModuleIdentifier   (token parsing)
//!                                      ├── version::VersionComparator (latest first, recent/old)
//!                                      ├── resolver::AclView          (access lists)
//!                                      ├── resolver::DependencyView   (bare/versioned/built)
//!                                      └── resolver::SetupRow         (setup items, secrets masked)
//! ```
//!
//! # Core Modules
//!
//! ## Catalog
//! - [`catalog`] - The [`catalog::Catalog`] lookup trait and the snapshot-backed cache
//! - [`models`] - Module identifiers and catalog records
//! - [`config`] - Server configuration and the catalog tree type
//!
//! ## Page Assembly
//! - [`pages`] - Category, module, version and build page assemblers
//! - [`resolver`] - ACL, dependency and setup projections
//! - [`version`] - Version ordering and classification
//! - [`templating`] - Context builder and renderers
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-facing error reporting
//! - [`constants`] - Defaults shared across the crate
//! - [`utils`] - URL encoding and name suggestions
//!
//! # Example
//!
//! ```rust
//! use isoftrepo::catalog::{Catalog, ModuleCache};
//! use isoftrepo::config::ConfigNode;
//! use isoftrepo::pages::{CatalogContext, module};
//!
//! let root = ConfigNode::new("catalog").with_child(
//!     ConfigNode::new("module").with_attr("name", "fftw").with_child(
//!         ConfigNode::new("builds").with_child(
//!             ConfigNode::new("build")
//!                 .with_attr("ver", "3.3.10")
//!                 .with_attr("arch", "x86_64")
//!                 .with_attr("mode", "single")
//!                 .with_attr("verindx", "3.31"),
//!         ),
//!     ),
//! );
//! let catalog = ModuleCache::from_tree(&root);
//!
//! let page = module::assemble(&catalog, &CatalogContext::default(), "fftw").unwrap();
//! assert_eq!(page.field("DEFAULTA"), Some("fftw:3.3.10"));
//! assert_eq!(page.field("DEFAULTB"), Some("auto:auto"));
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Category overview
//! isoftrepo render --catalog catalog.json
//!
//! # Build details as the JSON context a template receives
//! isoftrepo render --catalog catalog.json --action build \
//!     --module gromacs:2021.4:x86_64:para --format json
//!
//! # Effective server configuration
//! isoftrepo config show
//! ```

// Catalog and configuration
pub mod catalog;
pub mod config;
pub mod models;

// Page assembly
pub mod pages;
pub mod resolver;
pub mod templating;
pub mod version;

// Supporting modules
pub mod cli;
pub mod constants;
pub mod core;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
