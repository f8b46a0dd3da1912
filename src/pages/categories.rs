//! Category overview (`ListCategories.html`).

use std::collections::BTreeSet;
use tracing::{debug, error};

use super::CatalogContext;
use super::common::{set_with_url, start_page};
use crate::catalog::Catalog;
use crate::constants::{SYSTEM_CATEGORY, SYSTEM_CATEGORY_TITLE};
use crate::core::RepoError;
use crate::templating::{ContextBuilder, RenderContext};

/// Assemble the category page.
///
/// Categories come sorted, empty ones are skipped, and the system category is
/// appended last under its display title. With `include_versions` every
/// entry is a `name:version` token and links go to version pages.
pub fn assemble(
    catalog: &dyn Catalog,
    ctx: &CatalogContext,
    include_versions: bool,
) -> Result<RenderContext, RepoError> {
    debug!(include_versions, "Assembling category page");
    build_context(catalog, ctx, include_versions).inspect_err(|e| error!("Category page failed: {e}"))
}

fn build_context(
    catalog: &dyn Catalog,
    ctx: &CatalogContext,
    include_versions: bool,
) -> Result<RenderContext, RepoError> {
    let mut builder = start_page(ctx);

    drop(builder.conditional("CHECKED_VERS", include_versions));
    builder.set_field(
        "ACTION",
        if include_versions {
            "version"
        } else {
            "module"
        },
    );

    {
        let mut categories = builder.repeating("CATEGORIES");
        for category in catalog.categories() {
            let members = catalog.modules_in_category(&category, include_versions);
            emit_category(&mut categories, &category, &members);
        }
        let system = catalog.modules_in_category(SYSTEM_CATEGORY, include_versions);
        emit_category(&mut categories, SYSTEM_CATEGORY_TITLE, &system);
    }

    Ok(builder.finalize()?)
}

fn emit_category(categories: &mut ContextBuilder, title: &str, members: &BTreeSet<String>) {
    if members.is_empty() {
        return;
    }
    categories.set_field("CATEGORY", title);
    {
        let mut modules = categories.repeating("MODULES");
        for member in members {
            modules.row(|row| set_with_url(row, "MODULE", "MODULEURL", member));
        }
    }
    categories.advance_row();
}
