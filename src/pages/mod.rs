//! Page assemblers.
//!
//! Each request kind has one assembler that looks its subject up in the
//! [`Catalog`], runs the resolvers and fills a
//! [`ContextBuilder`](crate::templating::ContextBuilder):
//!
//! | action                 | assembler      | template              |
//! |------------------------|----------------|-----------------------|
//! | missing / `categories` | [`categories`] | `ListCategories.html` |
//! | `module`               | [`module`]     | `Module.html`         |
//! | `version`              | [`version`]    | `Version.html`        |
//! | `build`                | [`build`]      | `Build.html`          |
//!
//! Assemblers are synchronous and never panic. A failure is logged and
//! returned; [`dispatch`] turns it into the `Error.html` page.
//!
//! ```rust
//! use isoftrepo::pages::{CatalogContext, RequestParams, dispatch};
//! use isoftrepo::templating::PageTemplate;
//! use isoftrepo::test_utils::fixtures::sample_catalog;
//!
//! let catalog = sample_catalog();
//! let request = RequestParams::new("version", "gromacs:2021.4");
//! let context = CatalogContext::default();
//!
//! let page = dispatch(&catalog, &context, &request);
//! assert_eq!(page.template, PageTemplate::Version);
//! assert_eq!(page.context.field("MODVER"), Some("gromacs:2021.4"));
//! ```

pub mod build;
pub mod categories;
mod common;
pub mod module;
mod request;
pub mod version;

pub use request::RequestParams;

use tracing::error;

use crate::catalog::Catalog;
use crate::config::ServerConfig;
use crate::constants::{AMS_VERSION, DEFAULT_RECENT_VERSION_LIMIT};
use crate::core::RepoError;
use crate::templating::{ContextBuilder, PageTemplate, RenderContext};

/// The kind of page a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Categories,
    Module,
    Version,
    Build,
}

impl PageKind {
    /// Select the page for an `action` parameter.
    pub fn from_action(action: Option<&str>) -> Result<Self, RepoError> {
        match action {
            None | Some("categories") => Ok(Self::Categories),
            Some("module") => Ok(Self::Module),
            Some("version") => Ok(Self::Version),
            Some("build") => Ok(Self::Build),
            Some(other) => Err(RepoError::UnknownAction {
                action: other.to_string(),
            }),
        }
    }

    pub const fn template(self) -> PageTemplate {
        match self {
            Self::Categories => PageTemplate::ListCategories,
            Self::Module => PageTemplate::Module,
            Self::Version => PageTemplate::Version,
            Self::Build => PageTemplate::Build,
        }
    }
}

/// Per-deployment values every page needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogContext {
    /// Published as `SERVERSCRIPTURI`.
    pub server_script_uri: String,
    /// Published as `AMSVER`.
    pub ams_version: String,
    /// Published as `MONITORING` when set.
    pub monitoring: Option<String>,
    pub recent_version_limit: usize,
}

impl Default for CatalogContext {
    fn default() -> Self {
        Self {
            server_script_uri: String::new(),
            ams_version: AMS_VERSION.to_string(),
            monitoring: None,
            recent_version_limit: DEFAULT_RECENT_VERSION_LIMIT,
        }
    }
}

impl CatalogContext {
    pub fn from_config(config: &ServerConfig, request: &RequestParams) -> Self {
        Self {
            server_script_uri: request.server_script_uri(),
            ams_version: AMS_VERSION.to_string(),
            monitoring: config.monitoring_html().map(str::to_string),
            recent_version_limit: config.server.recent_version_limit,
        }
    }
}

/// A finished page: which template to use and what to feed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub template: PageTemplate,
    pub context: RenderContext,
}

/// Run the assembler of `kind`.
pub fn assemble(
    kind: PageKind,
    catalog: &dyn Catalog,
    ctx: &CatalogContext,
    request: &RequestParams,
) -> Result<RenderContext, RepoError> {
    match kind {
        PageKind::Categories => categories::assemble(catalog, ctx, request.include_vers),
        PageKind::Module => module::assemble(catalog, ctx, &request.module),
        PageKind::Version => version::assemble(catalog, ctx, &request.module),
        PageKind::Build => build::assemble(catalog, ctx, &request.module),
    }
}

/// Answer a request with its page, or with the error page when anything fails.
pub fn dispatch(catalog: &dyn Catalog, ctx: &CatalogContext, request: &RequestParams) -> Page {
    let result = PageKind::from_action(request.action.as_deref()).and_then(|kind| {
        assemble(kind, catalog, ctx, request).map(|context| Page {
            template: kind.template(),
            context,
        })
    });

    match result {
        Ok(page) => page,
        Err(e) => {
            error!("Request for action {:?} failed: {e}", request.action);
            error_page(ctx, &e)
        }
    }
}

/// The `Error.html` page with `MESSAGE` set to `error`.
pub fn error_page(ctx: &CatalogContext, error: &RepoError) -> Page {
    let mut builder = common::start_page(ctx);
    builder.set_field("MESSAGE", error.to_string());
    Page {
        template: PageTemplate::Error,
        context: finish_flat(builder),
    }
}

/// Finalize a builder that never opened a region.
fn finish_flat(builder: ContextBuilder) -> RenderContext {
    builder.finalize().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_catalog;
    use crate::config::MonitoringSection;
    use crate::test_utils::init_test_logging;

    #[test]
    fn test_from_action() {
        assert_eq!(PageKind::from_action(None).unwrap(), PageKind::Categories);
        assert_eq!(PageKind::from_action(Some("categories")).unwrap(), PageKind::Categories);
        assert_eq!(PageKind::from_action(Some("build")).unwrap(), PageKind::Build);
        assert!(matches!(
            PageKind::from_action(Some("delete")),
            Err(RepoError::UnknownAction { ref action }) if action == "delete"
        ));
    }

    #[test]
    fn test_context_from_config() {
        let mut config = ServerConfig::default();
        config.server.recent_version_limit = 3;
        let request = RequestParams {
            server_name: "repo".to_string(),
            server_port: "80".to_string(),
            script_name: "/isoftrepo".to_string(),
            ..RequestParams::default()
        };
        let ctx = CatalogContext::from_config(&config, &request);
        assert_eq!(ctx.server_script_uri, "http://repo/isoftrepo");
        assert_eq!(ctx.recent_version_limit, 3);
        assert!(ctx.monitoring.is_none());

        config.monitoring = Some(MonitoringSection {
            html: "<b>up</b>".to_string(),
        });
        let ctx = CatalogContext::from_config(&config, &request);
        assert_eq!(ctx.monitoring.as_deref(), Some("<b>up</b>"));
    }

    #[test]
    fn test_dispatch_falls_back_to_error_page() {
        init_test_logging(None);
        let catalog = sample_catalog();
        let ctx = CatalogContext::default();

        let page = dispatch(&catalog, &ctx, &RequestParams::new("module", "nosuchmodule"));
        assert_eq!(page.template, PageTemplate::Error);
        assert_eq!(page.context.field("MESSAGE"), Some("module not found 'nosuchmodule'"));
        assert_eq!(page.context.field("AMSVER"), Some(AMS_VERSION));

        let page = dispatch(&catalog, &ctx, &RequestParams::new("purge", ""));
        assert_eq!(page.context.field("MESSAGE"), Some("unknown action 'purge'"));
    }

    #[test]
    fn test_dispatch_default_action_lists_categories() {
        let catalog = sample_catalog();
        let page = dispatch(&catalog, &CatalogContext::default(), &RequestParams::default());
        assert_eq!(page.template, PageTemplate::ListCategories);
        assert!(page.context.repeating("CATEGORIES").is_some());
    }
}
