//! Render one page from a catalog snapshot.
//!
//! This is the request path of the repository browser without the network
//! transport: the flags stand in for the query and server parameters.
//!
//! ```bash
//! # Category overview with version links
//! isoftrepo render --catalog catalog.json --include-vers
//!
//! # Module page rendered through the configured templates
//! isoftrepo render --catalog catalog.json --action module --module gromacs
//!
//! # Inspect the context a template would receive
//! isoftrepo render --catalog catalog.json --action build \
//!     --module gromacs:2021.4:x86_64:para --format json
//! ```
//!
//! Lookup failures render the error page, as the server would. `--strict`
//! turns them into a failing exit status instead.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::config::ServerConfig;
use crate::pages::{self, CatalogContext, Page, PageKind, RequestParams};
use crate::templating::{JsonPageRenderer, PageRenderer, TeraPageRenderer};

/// Output of the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Instantiate the HTML template
    Html,
    /// Print the page context as JSON
    Json,
}

/// Command to render a page.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Catalog snapshot (JSON tree)
    #[arg(long)]
    catalog: PathBuf,

    /// Page to render: categories, module, version or build
    #[arg(long)]
    action: Option<String>,

    /// Module token (`name[:version[:arch[:mode]]]`)
    #[arg(long, default_value = "")]
    module: String,

    /// List versions instead of modules on the category page
    #[arg(long)]
    include_vers: bool,

    /// Server name used for SERVERSCRIPTURI
    #[arg(long, default_value = "localhost")]
    server_name: String,

    /// Server port; 443 selects https
    #[arg(long, default_value = "80")]
    server_port: String,

    /// Script name used for SERVERSCRIPTURI
    #[arg(long, default_value = "/isoftrepo")]
    script_name: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Template directory, overriding `[server] templates`
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Fail instead of rendering the error page
    #[arg(long)]
    strict: bool,
}

impl RenderCommand {
    fn request(&self) -> RequestParams {
        RequestParams {
            action: self.action.clone(),
            module: self.module.clone(),
            include_vers: self.include_vers,
            server_name: self.server_name.clone(),
            server_port: self.server_port.clone(),
            script_name: self.script_name.clone(),
        }
    }

    pub async fn execute(self, config: &ServerConfig) -> Result<()> {
        let snapshot = CatalogSnapshot::load_from(&self.catalog)
            .await
            .with_context(|| format!("Failed to load catalog from {}", self.catalog.display()))?;
        let catalog = snapshot.to_cache();
        debug!(
            bundle = %config.ams.name,
            path = %config.ams.path,
            modules = catalog.len(),
            "Loaded catalog {}",
            self.catalog.display()
        );

        let request = self.request();
        let ctx = CatalogContext::from_config(config, &request);

        let page = if self.strict {
            let kind = PageKind::from_action(request.action.as_deref())?;
            Page {
                template: kind.template(),
                context: pages::assemble(kind, &catalog, &ctx, &request)?,
            }
        } else {
            pages::dispatch(&catalog, &ctx, &request)
        };

        let renderer: Box<dyn PageRenderer> = match self.format {
            OutputFormat::Json => Box::new(JsonPageRenderer),
            OutputFormat::Html => {
                let dir = self.templates.clone().unwrap_or_else(|| config.template_dir());
                Box::new(TeraPageRenderer::from_dir(&dir)?)
            }
        };

        let output = renderer.render(page.template, &page.context)?;
        println!("{output}");
        Ok(())
    }
}
