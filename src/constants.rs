//! Global constants used throughout the isoftrepo codebase.
//!
//! Deployment-tunable values (port, template directory, recent-version
//! threshold) live here as named defaults; [`crate::config::ServerConfig`]
//! overrides them per installation.

/// Default FastCGI port the repository browser listens on.
pub const DEFAULT_PORT: u16 = 32696;

/// Default location of the HTML page templates.
pub const DEFAULT_TEMPLATE_DIR: &str = "/opt/ams-isoftrepo/9.0/var/html/isoftrepo/templates";

/// Number of distinct versions shown as "recent" on a module page.
///
/// Versions ranked past this limit are classified as old and hidden behind
/// the "show older versions" toggle.
pub const DEFAULT_RECENT_VERSION_LIMIT: usize = 5;

/// Literal substituted for the value of a secret setup variable.
pub const SECRET_MASK: &str = "*******";

/// Category holding system modules and modules without any category.
pub const SYSTEM_CATEGORY: &str = "sys";

/// Display title of the [`SYSTEM_CATEGORY`] block on the category page.
pub const SYSTEM_CATEGORY_TITLE: &str = "System & Uncategorized Modules";

/// Placeholder shown for an unset default architecture or mode.
pub const AUTO_PLACEHOLDER: &str = "auto";

/// Version string published to every page as `AMSVER`.
pub const AMS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the server configuration path.
pub const CONFIG_PATH_ENV: &str = "ISOFTREPO_CONFIG";

/// Maximum Levenshtein distance for "did you mean" module suggestions.
pub const MAX_SUGGESTION_DISTANCE: usize = 3;
