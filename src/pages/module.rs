//! Module overview (`Module.html`).
//!
//! Fields:
//!
//! - `MODULE`, `MODULEURL`
//! - `VERSIONS[ MODVER, MODVERURL, CLASS ]`, latest first, and `SHOWOLD`
//! - `DESCRIPTION` (raw markup, only when documented)
//! - `DEFAULTA` (`name:version`), `DEFAULTB` (`arch:mode`, unset parts `auto`)
//! - `ACL{ RULES[ACLRULE], DEFACL }`
//! - `EXTRAACL{ EBUILDS[ BUILD, BUILDURL ] }` when some build has its own ACL
//! - `DEPENDENCIES{ DEPS[...] }`

use tracing::{debug, error};

use super::CatalogContext;
use super::common::{find_module, set_with_url, start_page};
use crate::catalog::Catalog;
use crate::constants::AUTO_PLACEHOLDER;
use crate::core::RepoError;
use crate::models::{ModuleIdentifier, ModuleRecord};
use crate::resolver::AclView;
use crate::resolver::dependency::emit_dependencies;
use crate::templating::{ContextBuilder, RenderContext};
use crate::version::{VersionComparator, VersionRecord};

/// Assemble the module page for `token`; only its name part is used.
pub fn assemble(catalog: &dyn Catalog, ctx: &CatalogContext, token: &str) -> Result<RenderContext, RepoError> {
    let id = ModuleIdentifier::parse(token);
    debug!(module = %id.name, "Assembling module page");
    build_context(catalog, ctx, &id.name).inspect_err(|e| error!("Module page for '{token}' failed: {e}"))
}

fn build_context(catalog: &dyn Catalog, ctx: &CatalogContext, name: &str) -> Result<RenderContext, RepoError> {
    let mut builder = start_page(ctx);
    set_with_url(&mut builder, "MODULE", "MODULEURL", name);

    let module = find_module(catalog, name)?;

    emit_versions(&mut builder, module, ctx.recent_version_limit);

    if let Some(doc) = catalog.module_documentation(name) {
        builder.set_field("DESCRIPTION", doc.as_str());
    }

    let defaults = catalog.module_defaults(name).unwrap_or_default();
    builder.set_field("DEFAULTA", format!("{name}:{}", defaults.version));
    builder.set_field(
        "DEFAULTB",
        format!("{}:{}", or_auto(&defaults.architecture), or_auto(&defaults.mode)),
    );

    AclView::resolve(module.acl.as_ref()).emit(&mut builder);
    emit_extra_acl(&mut builder, module);
    emit_dependencies(&mut builder, module.dependencies.as_deref());

    Ok(builder.finalize()?)
}

fn emit_versions(builder: &mut ContextBuilder, module: &ModuleRecord, recent_limit: usize) {
    let listing = VersionComparator::rank(module.builds.iter().map(VersionRecord::from), recent_limit);
    {
        let mut versions = builder.repeating("VERSIONS");
        for version in &listing.versions {
            let modver = format!("{}:{}", module.name, version.version);
            versions.row(|row| {
                set_with_url(row, "MODVER", "MODVERURL", &modver);
                row.set_field("CLASS", version.class.as_str());
            });
        }
    }
    drop(builder.conditional("SHOWOLD", listing.show_old));
}

/// Point at the first build that carries its own access list.
fn emit_extra_acl(builder: &mut ContextBuilder, module: &ModuleRecord) {
    let first = module.builds.iter().find(|b| b.acl.is_some());
    let mut extra = builder.conditional("EXTRAACL", first.is_some());
    let mut builds = extra.repeating("EBUILDS");
    if let Some(build) = first {
        let name = build.identifier(&module.name).build_name();
        builds.row(|row| set_with_url(row, "BUILD", "BUILDURL", &name));
    }
}

fn or_auto(value: &str) -> &str {
    if value.is_empty() {
        AUTO_PLACEHOLDER
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_catalog;

    fn page(token: &str) -> RenderContext {
        assemble(&sample_catalog(), &CatalogContext::default(), token).unwrap()
    }

    #[test]
    fn test_versions_latest_first() {
        let ctx = page("gromacs");
        assert_eq!(ctx.field("MODULE"), Some("gromacs"));
        let versions = ctx.repeating("VERSIONS").unwrap();
        let modvers: Vec<_> = versions.iter().map(|v| v.field("MODVER").unwrap()).collect();
        assert_eq!(modvers, ["gromacs:2021.4", "gromacs:2020.1"]);
        assert_eq!(versions[0].field("MODVERURL"), Some("gromacs%3A2021.4"));
        assert_eq!(versions[0].field("CLASS"), Some("new"));
        assert!(!ctx.conditional("SHOWOLD").unwrap().active);
    }

    #[test]
    fn test_modver_round_trips_through_parser() {
        let token = "gromacs:2020.1:x86_64:single";
        let ctx = page(token);

        let requested = ModuleIdentifier::parse(token);
        let module = ModuleIdentifier::parse(ctx.field("MODULE").unwrap());
        assert_eq!(module.name, requested.name);
        assert!(!module.has_version());

        let parsed: Vec<_> = ctx
            .repeating("VERSIONS")
            .unwrap()
            .iter()
            .map(|row| ModuleIdentifier::parse(row.field("MODVER").unwrap()))
            .collect();
        let expected: Vec<_> = ["2021.4", "2020.1"]
            .into_iter()
            .map(|version| ModuleIdentifier {
                name: "gromacs".to_string(),
                version: version.to_string(),
                ..ModuleIdentifier::default()
            })
            .collect();
        assert_eq!(parsed, expected);

        for (row, id) in ctx.repeating("VERSIONS").unwrap().iter().zip(&parsed) {
            assert_eq!(row.field("MODVER"), Some(id.modver().as_str()));
        }
    }

    #[test]
    fn test_token_qualifiers_are_ignored() {
        let ctx = page("gromacs:2020.1:x86_64:single");
        assert_eq!(ctx.field("MODULE"), Some("gromacs"));
    }

    #[test]
    fn test_defaults() {
        let ctx = page("gromacs");
        assert_eq!(ctx.field("DEFAULTA"), Some("gromacs:2021.4"));
        assert_eq!(ctx.field("DEFAULTB"), Some("x86_64:single"));

        // Derived default leaves architecture and mode open.
        let ctx = page("cp2k");
        assert_eq!(ctx.field("DEFAULTA"), Some("cp2k:9.1"));
        assert_eq!(ctx.field("DEFAULTB"), Some("auto:auto"));
    }

    #[test]
    fn test_description_only_when_documented() {
        assert!(page("cp2k").field("DESCRIPTION").unwrap().contains("Quantum chemistry"));
        assert!(page("gromacs").field("DESCRIPTION").is_none());
    }

    #[test]
    fn test_acl_and_extra_acl() {
        let ctx = page("gromacs");
        let acl = ctx.conditional("ACL").unwrap();
        assert!(acl.active);
        assert_eq!(acl.body.field("DEFACL"), Some("deny all"));

        let extra = ctx.conditional("EXTRAACL").unwrap();
        assert!(extra.active);
        let builds = extra.body.repeating("EBUILDS").unwrap();
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].field("BUILD"), Some("gromacs:2021.4:x86_64:para"));

        let ctx = page("cp2k");
        assert!(!ctx.conditional("ACL").unwrap().active);
        let extra = ctx.conditional("EXTRAACL").unwrap();
        assert!(!extra.active);
        assert_eq!(extra.body.repeating("EBUILDS").map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_dependencies() {
        let ctx = page("gromacs");
        let deps = ctx.conditional("DEPENDENCIES").unwrap();
        assert!(deps.active);
        let rows = deps.body.repeating("DEPS").unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].conditional("MNAM").unwrap().active);
        assert!(rows[1].conditional("MVER").unwrap().active);
        assert!(rows[2].conditional("MBUILD").unwrap().active);
        assert_eq!(rows[2].field("DTYPE"), Some("post"));

        assert!(!page("cp2k").conditional("DEPENDENCIES").unwrap().active);
    }

    #[test]
    fn test_old_versions_past_limit() {
        let ctx = CatalogContext {
            recent_version_limit: 1,
            ..CatalogContext::default()
        };
        let page = assemble(&sample_catalog(), &ctx, "gromacs").unwrap();
        let classes: Vec<_> =
            page.repeating("VERSIONS").unwrap().iter().map(|v| v.field("CLASS").unwrap()).collect();
        assert_eq!(classes, ["new", "old"]);
        assert!(page.conditional("SHOWOLD").unwrap().active);
    }

    #[test]
    fn test_missing_module() {
        let err = assemble(&sample_catalog(), &CatalogContext::default(), "nope").unwrap_err();
        assert!(err.is_not_found());
        let err = assemble(&sample_catalog(), &CatalogContext::default(), "").unwrap_err();
        assert!(matches!(err, RepoError::ModuleNotFound { ref name, .. } if name.is_empty()));
    }
}
