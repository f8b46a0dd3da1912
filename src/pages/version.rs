//! Builds of one module version (`Version.html`).

use tracing::{debug, error};

use super::CatalogContext;
use super::common::{find_module, set_with_url, start_page};
use crate::catalog::Catalog;
use crate::core::RepoError;
use crate::models::ModuleIdentifier;
use crate::templating::RenderContext;

/// Assemble the version page for a `name:version` token.
///
/// Only a missing module is an error. A version no build carries, or a
/// token without a version, yields an empty `BUILDS` list.
pub fn assemble(catalog: &dyn Catalog, ctx: &CatalogContext, token: &str) -> Result<RenderContext, RepoError> {
    let id = ModuleIdentifier::parse(token);
    debug!(module = %id.name, version = %id.version, "Assembling version page");
    build_context(catalog, ctx, &id).inspect_err(|e| error!("Version page for '{token}' failed: {e}"))
}

fn build_context(
    catalog: &dyn Catalog,
    ctx: &CatalogContext,
    id: &ModuleIdentifier,
) -> Result<RenderContext, RepoError> {
    let mut builder = start_page(ctx);
    set_with_url(&mut builder, "MODVER", "MODVERURL", &id.modver());
    set_with_url(&mut builder, "MODULE", "MODULEURL", &id.name);
    builder.set_field("VERSION", id.version.as_str());

    let module = find_module(catalog, &id.name)?;
    let labels = catalog.sorted_build_labels(&module.name, &id.version);
    if labels.is_empty() {
        debug!(module = %id.name, version = %id.version, "No builds carry this version");
    }

    {
        let mut builds = builder.repeating("BUILDS");
        for label in &labels {
            let full_name = format!("{}:{label}", id.name);
            builds.row(|row| set_with_url(row, "BUILD", "TBUILD", &full_name));
        }
    }

    Ok(builder.finalize()?)
}
