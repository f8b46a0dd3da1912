use crate::catalog::Catalog;
use crate::core::RepoError;
use crate::models::ModuleRecord;
use crate::templating::ContextBuilder;
use crate::utils::{closest_matches, encode_for_url};

use super::CatalogContext;

/// Builder preloaded with the fields shared by every page.
pub(crate) fn start_page(ctx: &CatalogContext) -> ContextBuilder {
    let mut builder = ContextBuilder::new();
    builder.set_field("AMSVER", ctx.ams_version.as_str());
    if let Some(html) = &ctx.monitoring {
        builder.set_field("MONITORING", html.as_str());
    }
    builder.set_field("SERVERSCRIPTURI", ctx.server_script_uri.as_str());
    builder
}

/// Set `name` to `value` and `url_name` to its encoded form.
pub(crate) fn set_with_url(builder: &mut ContextBuilder, name: &str, url_name: &str, value: &str) {
    builder.set_field(name, value);
    builder.set_field(url_name, encode_for_url(value));
}

/// Look a module up, suggesting close names when it is missing.
pub(crate) fn find_module<'a>(catalog: &'a dyn Catalog, name: &str) -> Result<&'a ModuleRecord, RepoError> {
    catalog.module(name).ok_or_else(|| RepoError::ModuleNotFound {
        name: name.to_string(),
        suggestions: closest_matches(name, catalog.module_names()),
    })
}
