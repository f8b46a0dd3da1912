//! Sample catalog and template fixtures.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::catalog::ModuleCache;
use crate::config::ConfigNode;

fn build(ver: &str, arch: &str, mode: &str, verindx: &str) -> ConfigNode {
    ConfigNode::new("build")
        .with_attr("ver", ver)
        .with_attr("arch", arch)
        .with_attr("mode", mode)
        .with_attr("verindx", verindx)
}

fn category(name: &str) -> ConfigNode {
    ConfigNode::new("category").with_attr("name", name)
}

/// Catalog tree with three modules:
///
/// - `gromacs` (chemistry, physics): three builds over two versions, an
///   explicit default, a module ACL, an ACL on one build, dependencies of
///   every class and setup items including a secret
/// - `cp2k` (chemistry): two versions, documentation, no default element
/// - `cmake` (no category): one build without architecture or mode
pub fn sample_catalog_tree() -> ConfigNode {
    let gromacs = ConfigNode::new("module")
        .with_attr("name", "gromacs")
        .with_child(category("chemistry"))
        .with_child(category("physics"))
        .with_child(
            ConfigNode::new("default")
                .with_attr("ver", "2021.4")
                .with_attr("arch", "x86_64")
                .with_attr("mode", "single"),
        )
        .with_child(
            ConfigNode::new("acl")
                .with_attr("default", "deny")
                .with_child(ConfigNode::new("allow").with_attr("group", "chemists")),
        )
        .with_child(
            ConfigNode::new("deps")
                .with_child(ConfigNode::new("dep").with_attr("name", "fftw").with_attr("type", "pre"))
                .with_child(ConfigNode::new("dep").with_attr("name", "cuda:11.2").with_attr("type", "pre"))
                .with_child(
                    ConfigNode::new("dep")
                        .with_attr("name", "openmpi:4.1:x86_64:para")
                        .with_attr("type", "post"),
                ),
        )
        .with_child(
            ConfigNode::new("builds")
                .with_child(
                    build("2021.4", "x86_64", "para", "2021.4")
                        .with_child(
                            ConfigNode::new("acl")
                                .with_child(ConfigNode::new("allow").with_attr("group", "hpc")),
                        )
                        .with_child(
                            ConfigNode::new("deps").with_child(
                                ConfigNode::new("dep")
                                    .with_attr("name", "openmpi:4.1:x86_64:para")
                                    .with_attr("type", "pre"),
                            ),
                        )
                        .with_child(
                            ConfigNode::new("setup")
                                .with_child(
                                    ConfigNode::new("variable")
                                        .with_attr("name", "PATH")
                                        .with_attr("value", "/opt/gromacs/bin")
                                        .with_attr("operation", "prepend")
                                        .with_attr("priority", "10"),
                                )
                                .with_child(
                                    ConfigNode::new("variable")
                                        .with_attr("name", "GMX_LICENSE")
                                        .with_attr("value", "s3cr3t")
                                        .with_attr("operation", "set")
                                        .with_attr("secret", "true"),
                                )
                                .with_child(
                                    ConfigNode::new("script")
                                        .with_attr("name", "gmx-init.sh")
                                        .with_attr("type", "child"),
                                )
                                .with_child(
                                    ConfigNode::new("alias")
                                        .with_attr("name", "gmx")
                                        .with_attr("value", "gmx_mpi"),
                                ),
                        ),
                )
                .with_child(build("2021.4", "x86_64", "single", "2021.4"))
                .with_child(build("2020.1", "x86_64", "single", "2020.1")),
        );

    let cp2k = ConfigNode::new("module")
        .with_attr("name", "cp2k")
        .with_child(category("chemistry"))
        .with_child(ConfigNode::new("doc").with_text("<p>Quantum chemistry and solid state physics.</p>"))
        .with_child(
            ConfigNode::new("builds")
                .with_child(build("8.2", "x86_64", "para", "8.2"))
                .with_child(build("9.1", "x86_64", "para", "9.1")),
        );

    let cmake = ConfigNode::new("module")
        .with_attr("name", "cmake")
        .with_child(ConfigNode::new("builds").with_child(build("3.22", "", "", "3.22")));

    ConfigNode::new("catalog").with_children([gromacs, cp2k, cmake])
}

/// [`sample_catalog_tree`] decoded into a [`ModuleCache`].
pub fn sample_catalog() -> ModuleCache {
    ModuleCache::from_tree(&sample_catalog_tree())
}

/// A minimal set of page templates written to a directory.
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub files: Vec<(&'static str, &'static str)>,
}

impl TemplateFixture {
    /// One small template per page; each prints the fields a test is likely
    /// to assert on.
    pub fn basic() -> Self {
        Self {
            files: vec![
                (
                    "ListCategories.html",
                    "{% for c in CATEGORIES %}[{{ c.CATEGORY }}:{% for m in c.MODULES %} {{ m.MODULE }}{% endfor %}]{% endfor %}",
                ),
                (
                    "Module.html",
                    "<h1>{{ MODULE }}</h1>{% for v in VERSIONS %}<a class=\"{{ v.CLASS }}\" href=\"?action=version&module={{ v.MODVERURL }}\">{{ v.MODVER }}</a>{% endfor %}{% if ACL %}<p>{{ ACL.DEFACL }}</p>{% endif %}",
                ),
                (
                    "Version.html",
                    "<h1>{{ MODVER }}</h1>{% for b in BUILDS %}<a href=\"?action=build&module={{ b.TBUILD }}\">{{ b.BUILD }}</a>{% endfor %}",
                ),
                (
                    "Build.html",
                    "<h1>{{ BUILD }}</h1>{% for t in T %}<tr><td>{{ t.TTYPE }}</td><td>{{ t.TNAME }}</td><td>{{ t.TVALUE }}</td></tr>{% endfor %}",
                ),
                ("Error.html", "<p class=\"error\">{{ MESSAGE }}</p>"),
            ],
        }
    }

    /// Write the templates into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create template dir {}", dir.display()))?;
        for (name, content) in &self.files {
            let path = dir.join(name);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write template {}", path.display()))?;
        }
        Ok(())
    }
}
