//! Page assembly through the public API, rendered with the basic templates.

use isoftrepo::catalog::{Catalog, CatalogSnapshot};
use isoftrepo::core::RepoError;
use isoftrepo::pages::{self, CatalogContext, RequestParams};
use isoftrepo::templating::{PageRenderer, PageTemplate, TeraPageRenderer};
use isoftrepo::test_utils::{TemplateFixture, init_test_logging, sample_catalog, sample_catalog_tree};

fn renderer() -> TeraPageRenderer {
    TeraPageRenderer::from_sources(TemplateFixture::basic().files.iter().copied()).unwrap()
}

fn render(request: RequestParams) -> (PageTemplate, String) {
    let catalog = sample_catalog();
    let page = pages::dispatch(&catalog, &CatalogContext::default(), &request);
    let html = renderer().render(page.template, &page.context).unwrap();
    (page.template, html)
}

#[test]
fn test_browse_from_categories_to_build() {
    let (template, html) = render(RequestParams::default());
    assert_eq!(template, PageTemplate::ListCategories);
    assert!(html.starts_with("[chemistry: cp2k gromacs][physics: gromacs]"));

    let (template, html) = render(RequestParams::new("module", "gromacs"));
    assert_eq!(template, PageTemplate::Module);
    assert!(html.contains("href=\"?action=version&module=gromacs%3A2021.4\">gromacs:2021.4</a>"));

    let (template, html) = render(RequestParams::new("version", "gromacs:2021.4"));
    assert_eq!(template, PageTemplate::Version);
    let para = html.find("gromacs%3A2021.4%3Ax86_64%3Apara").unwrap();
    let single = html.find("gromacs%3A2021.4%3Ax86_64%3Asingle").unwrap();
    assert!(para < single);

    let (template, html) = render(RequestParams::new("build", "gromacs:2021.4:x86_64:para"));
    assert_eq!(template, PageTemplate::Build);
    assert!(html.contains("<td>variable</td><td>PATH</td><td>&#x2F;opt&#x2F;gromacs&#x2F;bin</td>"));
    assert!(html.contains("<td>alias</td><td>gmx</td><td>gmx_mpi</td>"));
    assert!(!html.contains("s3cr3t"));
}

#[test]
fn test_failures_become_error_pages() {
    init_test_logging(None);
    let (template, html) = render(RequestParams::new("version", "gromac:2021.4"));
    assert_eq!(template, PageTemplate::Error);
    assert!(html.contains("gromac"));

    let (template, _) = render(RequestParams::new("build", "gromacs:2021.4:arm64:para"));
    assert_eq!(template, PageTemplate::Error);

    let (template, html) = render(RequestParams::new("upload", ""));
    assert_eq!(template, PageTemplate::Error);
    assert!(html.contains("unknown action"));
}

#[test]
fn test_unknown_version_renders_empty_build_list() {
    let (template, html) = render(RequestParams::new("version", "gromacs:1999"));
    assert_eq!(template, PageTemplate::Version);
    assert_eq!(html, "<h1>gromacs:1999</h1>");
}

#[test]
fn test_assemblers_report_typed_errors() {
    let catalog = sample_catalog();
    let ctx = CatalogContext::default();

    let err = pages::module::assemble(&catalog, &ctx, "gromac").unwrap_err();
    match err {
        RepoError::ModuleNotFound {
            name,
            suggestions,
        } => {
            assert_eq!(name, "gromac");
            assert_eq!(suggestions, ["gromacs"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = pages::build::assemble(&catalog, &ctx, "cp2k:9.1:x86_64:single").unwrap_err();
    assert!(matches!(err, RepoError::BuildNotFound { ref build } if build == "cp2k:9.1:x86_64:single"));
}

#[test]
fn test_include_versions_from_request() {
    let catalog = sample_catalog();
    let mut request = RequestParams::default();
    request.include_vers = RequestParams::parse_include_vers(Some("true"));
    let page = pages::dispatch(&catalog, &CatalogContext::default(), &request);
    assert!(page.context.conditional("CHECKED_VERS").is_some_and(|c| c.active));

    let html = renderer().render(page.template, &page.context).unwrap();
    assert!(html.contains("[physics: gromacs:2020.1 gromacs:2021.4]"));
}

#[test]
fn test_snapshot_json_matches_fixture() {
    let json = serde_json::to_string(&sample_catalog_tree()).unwrap();
    let snapshot = CatalogSnapshot::from_json(&json, "fixture").unwrap();
    let cache = snapshot.to_cache();

    assert_eq!(cache.len(), 3);
    assert_eq!(cache.categories(), ["chemistry", "physics"]);
    assert_eq!(
        cache.module_documentation("cp2k").map(|d| d.as_str()),
        Some("<p>Quantum chemistry and solid state physics.</p>")
    );
}
