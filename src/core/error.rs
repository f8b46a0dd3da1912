//! Error handling for isoftrepo
//!
//! This module provides the error types and user-friendly error reporting for the
//! repository browser. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling inside the library
//! 2. **User-friendly messages** with actionable suggestions for the CLI
//!
//! # Architecture
//!
//! - [`RepoError`] - Enumerated failure cases of catalog lookups, page assembly,
//!   configuration loading and rendering
//! - [`ErrorContext`] - Wrapper that adds suggestions and details for display
//!
//! # Error Categories
//!
//! - **Lookup**: [`RepoError::ModuleNotFound`], [`RepoError::BuildNotFound`]
//! - **Assembly**: [`RepoError::Structure`] (unbalanced context regions)
//! - **Configuration**: [`RepoError::ConfigError`], [`RepoError::ConfigNotFound`],
//!   [`RepoError::CatalogParseError`]
//! - **Rendering**: [`RepoError::TemplateError`]
//!
//! Identifier parsing is deliberately not an error source: a malformed token
//! simply fails the subsequent lookup with one of the not-found variants.
//!
//! # Examples
//!
//! ```rust,no_run
//! use isoftrepo::core::{RepoError, user_friendly_error};
//!
//! let error = RepoError::ModuleNotFound {
//!     name: "gromac".to_string(),
//!     suggestions: vec!["gromacs".to_string()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::StructuralError;

/// The main error type for isoftrepo operations.
///
/// Lookup failures are recoverable per request: the dispatcher logs them and
/// falls back to the error page. Structural failures indicate a bug in a page
/// assembler and abort only the request that hit them.
#[derive(Error, Debug, Clone)]
pub enum RepoError {
    /// Module is not present in the catalog snapshot
    #[error("module not found '{name}'")]
    ModuleNotFound {
        /// Module name as parsed from the request token
        name: String,
        /// Similar module names from the catalog, closest first
        suggestions: Vec<String>,
    },

    /// No build matches the requested (version, architecture, mode) triple
    #[error("build '{build}' was not found")]
    BuildNotFound {
        /// The requested token, as supplied by the caller
        build: String,
    },

    /// Page context regions were left unbalanced
    #[error("unable to prepare parameters: {0}")]
    Structure(#[from] StructuralError),

    /// Request named an action no assembler handles
    #[error("unknown action '{action}'")]
    UnknownAction {
        /// The action value from the request
        action: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Config file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the configuration file that was not found
        path: String,
    },

    /// Catalog snapshot could not be decoded
    #[error("Invalid catalog snapshot in {file}")]
    CatalogParseError {
        /// Path to the snapshot file
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Template loading or rendering failed
    #[error("Template error in '{template}': {reason}")]
    TemplateError {
        /// Template name
        template: String,
        /// Renderer diagnostic
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(String),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl From<std::io::Error> for RepoError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

impl From<toml::de::Error> for RepoError {
    fn from(error: toml::de::Error) -> Self {
        Self::TomlError(error.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

impl RepoError {
    /// Returns `true` for the lookup failures that map to a "not found" page.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ModuleNotFound { .. } | Self::BuildNotFound { .. }
        )
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`RepoError`] with an optional suggestion (shown in green) and
/// optional details (shown in yellow) for terminal display.
///
/// ```rust,no_run
/// use isoftrepo::core::{ErrorContext, RepoError};
///
/// let context = ErrorContext::new(RepoError::ConfigNotFound {
///     path: "/etc/isoftrepo.toml".to_string(),
/// })
/// .with_suggestion("Pass --config with the path to the server configuration");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: RepoError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: RepoError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`RepoError`] variants (with tailored suggestions),
/// [`std::io::Error`] and [`toml::de::Error`]; anything else is reported with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(repo_error) = error.downcast_ref::<RepoError>() {
        return create_error_context(repo_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(RepoError::IoError(io_error.to_string()))
                .with_suggestion("Check that the file or directory exists and the path is correct");
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(RepoError::TomlError(toml_error.to_string()))
            .with_suggestion("Check the TOML syntax of the server configuration file");
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(RepoError::Other {
        message,
    })
}

fn create_error_context(error: RepoError) -> ErrorContext {
    match &error {
        RepoError::ModuleNotFound {
            suggestions,
            ..
        } => {
            let ctx = ErrorContext::new(error.clone())
                .with_details("Module names are matched exactly against the catalog snapshot");
            if suggestions.is_empty() {
                ctx.with_suggestion("Run 'isoftrepo render' without --module to list all categories")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        RepoError::BuildNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Builds are addressed as name:version:architecture:mode")
            .with_details("All four parts must match a build of the module exactly"),
        RepoError::Structure(_) => ErrorContext::new(error)
            .with_details("A page assembler left a context region open; this is a bug"),
        RepoError::UnknownAction {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Valid actions are: categories, module, version, build"),
        RepoError::ConfigNotFound {
            ..
        } => ErrorContext::new(error).with_suggestion(format!(
            "Pass --config or set {} to the server configuration file",
            crate::constants::CONFIG_PATH_ENV
        )),
        RepoError::CatalogParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("The catalog snapshot must be a JSON-serialized node tree"),
        RepoError::TemplateError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the templates directory configured under [server]"),
        _ => ErrorContext::new(error),
    }
}
