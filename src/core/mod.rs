//! Core types for isoftrepo
//!
//! This module holds the error system shared by every other module:
//! - [`RepoError`] - Enumerated failure modes of lookups, assembly and configuration
//! - [`ErrorContext`] - User-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! # Error Handling Pattern
//!
//! Library code returns `Result<T, RepoError>`; binary glue works in
//! [`anyhow::Result`] and converts at the edge:
//!
//! ```rust,no_run
//! use isoftrepo::core::{RepoError, user_friendly_error};
//!
//! fn lookup() -> anyhow::Result<()> {
//!     Err(RepoError::BuildNotFound { build: "cp2k:8.2:x86_64:para".into() }.into())
//! }
//!
//! if let Err(e) = lookup() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, RepoError, user_friendly_error};
