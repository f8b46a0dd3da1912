//! Single build details (`Build.html`).
//!
//! Besides the identifying fields the page carries the build's own access
//! list, its dependencies and the `T` table of setup items.

use tracing::{debug, error};

use super::CatalogContext;
use super::common::{find_module, set_with_url, start_page};
use crate::catalog::Catalog;
use crate::core::RepoError;
use crate::models::ModuleIdentifier;
use crate::resolver::AclView;
use crate::resolver::dependency::emit_dependencies;
use crate::resolver::setup::emit_setup;
use crate::templating::RenderContext;

/// Assemble the build page for a fully qualified token.
pub fn assemble(catalog: &dyn Catalog, ctx: &CatalogContext, token: &str) -> Result<RenderContext, RepoError> {
    let id = ModuleIdentifier::parse(token);
    debug!(build = %id.build_name(), "Assembling build page");
    build_context(catalog, ctx, &id, token).inspect_err(|e| error!("Build page for '{token}' failed: {e}"))
}

fn build_context(
    catalog: &dyn Catalog,
    ctx: &CatalogContext,
    id: &ModuleIdentifier,
    token: &str,
) -> Result<RenderContext, RepoError> {
    let module = find_module(catalog, &id.name)?;
    let build = catalog.build(&module.name, &id.version, &id.architecture, &id.mode).ok_or_else(|| {
        RepoError::BuildNotFound {
            build: token.to_string(),
        }
    })?;

    let mut builder = start_page(ctx);
    set_with_url(&mut builder, "MODVER", "MODVERURL", &id.modver());
    set_with_url(&mut builder, "BUILD", "BUILDURL", &id.build_name());
    set_with_url(&mut builder, "MODULE", "MODULEURL", &id.name);
    builder.set_field("VERSION", id.version.as_str());
    builder.set_field("ARCH", id.architecture.as_str());
    builder.set_field("MODE", id.mode.as_str());

    AclView::resolve(build.acl.as_ref()).emit(&mut builder);
    emit_dependencies(&mut builder, build.dependencies.as_deref());
    emit_setup(&mut builder, &build.setup_items);

    Ok(builder.finalize()?)
}
