//! Catalog records decoded from the module tree.
//!
//! Each record type has a `from_node` constructor reading the element layout
//! below. Missing attributes become empty strings; nothing here fails.
//!
//! ```text
//! module name=
//! ├── category name=            (repeatable; none means the system category)
//! ├── default ver= arch= mode=
//! ├── doc                        (text)
//! ├── acl default=               children: <rule-kind group=>
//! ├── deps                       children: dep name= type=
//! └── builds
//!     └── build ver= arch= mode= verindx=
//!         ├── acl
//!         ├── deps
//!         └── setup              children: variable | script | alias
//! ```

use crate::config::ConfigNode;

use super::ModuleIdentifier;

/// Default posture of an access list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AclPolicy {
    #[default]
    Allow,
    Deny,
}

/// One explicit access rule, e.g. `allow group=chemists`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclEntry {
    /// Element name of the rule (`allow`, `deny`, ...).
    pub rule_kind: String,
    pub group: String,
}

/// Access list attached to a module or a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AclRule {
    pub default_policy: AclPolicy,
    pub entries: Vec<AclEntry>,
}

impl AclRule {
    pub fn from_node(node: &ConfigNode) -> Self {
        // Anything but an explicit, non-empty, non-"allow" default keeps allow.
        let default_policy = match node.attr("default") {
            Some(value) if !value.is_empty() && value != "allow" => AclPolicy::Deny,
            _ => AclPolicy::Allow,
        };
        let entries = node
            .children()
            .iter()
            .map(|rule| AclEntry {
                rule_kind: rule.tag().to_string(),
                group: rule.attr_string("group"),
            })
            .collect();
        Self {
            default_policy,
            entries,
        }
    }
}

/// Unparsed dependency edge; the target is classified at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    /// Composite module token (`name[:version[:arch[:mode]]]`).
    pub target_token: String,
    /// Relation type, e.g. `pre` or `post`.
    pub kind: String,
}

impl DependencyEdge {
    pub fn from_node(node: &ConfigNode) -> Self {
        Self {
            target_token: node.attr_string("name"),
            kind: node.attr_string("type"),
        }
    }

    /// Decode the `dep` children of a `deps` element.
    pub fn list_from_node(deps: &ConfigNode) -> Vec<Self> {
        deps.children_by_tag("dep").map(Self::from_node).collect()
    }
}

/// Environment mutation performed when a build is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupItem {
    Variable {
        name: String,
        value: String,
        operation: String,
        priority: String,
        secret: bool,
    },
    Script {
        name: String,
        script_type: String,
        priority: String,
    },
    Alias {
        name: String,
        value: String,
        priority: String,
    },
    /// Tag this version of the browser does not know; rendered with the
    /// discriminator only.
    Unknown {
        tag: String,
    },
}

impl SetupItem {
    pub fn from_node(node: &ConfigNode) -> Self {
        match node.tag() {
            "variable" => Self::Variable {
                name: node.attr_string("name"),
                value: node.attr_string("value"),
                operation: node.attr_string("operation"),
                priority: node.attr_string("priority"),
                secret: node.attribute_or("secret", false),
            },
            "script" => Self::Script {
                name: node.attr_string("name"),
                script_type: node.attr_string("type"),
                priority: node.attr_string("priority"),
            },
            "alias" => Self::Alias {
                name: node.attr_string("name"),
                value: node.attr_string("value"),
                priority: node.attr_string("priority"),
            },
            other => Self::Unknown {
                tag: other.to_string(),
            },
        }
    }

    /// Element name, used as the row-type discriminator.
    pub fn tag(&self) -> &str {
        match self {
            Self::Variable {
                ..
            } => "variable",
            Self::Script {
                ..
            } => "script",
            Self::Alias {
                ..
            } => "alias",
            Self::Unknown {
                tag,
            } => tag,
        }
    }
}

/// Module description markup, embedded into the module page verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFragment(pub String);

impl DocFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build selected when a user loads a module without qualifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDefaults {
    pub version: String,
    pub architecture: String,
    pub mode: String,
}

/// One (version, architecture, mode) build of a module.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRecord {
    pub version: String,
    pub architecture: String,
    pub mode: String,
    /// Numeric sort key; independent of the version label.
    pub version_index: f64,
    pub acl: Option<AclRule>,
    /// `None` when the build has no `deps` element at all.
    pub dependencies: Option<Vec<DependencyEdge>>,
    pub setup_items: Vec<SetupItem>,
}

impl BuildRecord {
    pub fn from_node(node: &ConfigNode) -> Self {
        Self {
            version: node.attr_string("ver"),
            architecture: node.attr_string("arch"),
            mode: node.attr_string("mode"),
            version_index: node.attribute_or("verindx", 0.0),
            acl: node.first_child("acl").map(AclRule::from_node),
            dependencies: node.first_child("deps").map(DependencyEdge::list_from_node),
            setup_items: node
                .first_child("setup")
                .map(|setup| setup.children().iter().map(SetupItem::from_node).collect())
                .unwrap_or_default(),
        }
    }

    /// `version:architecture:mode`, as listed on a version page.
    pub fn label(&self) -> String {
        format!("{}:{}:{}", self.version, self.architecture, self.mode)
    }

    /// Fully qualified identifier of this build within `module`.
    pub fn identifier(&self, module: &str) -> ModuleIdentifier {
        ModuleIdentifier {
            name: module.to_string(),
            version: self.version.clone(),
            architecture: self.architecture.clone(),
            mode: self.mode.clone(),
        }
    }

    pub fn matches(&self, version: &str, architecture: &str, mode: &str) -> bool {
        self.version == version && self.architecture == architecture && self.mode == mode
    }
}

/// A module with all of its builds.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRecord {
    pub name: String,
    pub categories: Vec<String>,
    pub builds: Vec<BuildRecord>,
    pub acl: Option<AclRule>,
    pub docs: Option<DocFragment>,
    /// Explicit `default` element, if any.
    pub defaults: Option<ModuleDefaults>,
    /// Module-level dependencies; `None` without a `deps` element.
    pub dependencies: Option<Vec<DependencyEdge>>,
}

impl ModuleRecord {
    pub fn from_node(node: &ConfigNode) -> Self {
        Self {
            name: node.attr_string("name"),
            categories: node
                .children_by_tag("category")
                .map(|c| c.attr_string("name"))
                .filter(|c| !c.is_empty())
                .collect(),
            builds: node.children_by_path("builds/build").map(BuildRecord::from_node).collect(),
            acl: node.first_child("acl").map(AclRule::from_node),
            docs: node
                .first_child("doc")
                .and_then(ConfigNode::text)
                .map(|t| DocFragment(t.to_string())),
            defaults: node.first_child("default").map(|d| ModuleDefaults {
                version: d.attr_string("ver"),
                architecture: d.attr_string("arch"),
                mode: d.attr_string("mode"),
            }),
            dependencies: node.first_child("deps").map(DependencyEdge::list_from_node),
        }
    }

    /// True when any build carries its own `acl` element.
    pub fn has_build_acl(&self) -> bool {
        self.builds.iter().any(|b| b.acl.is_some())
    }

    pub fn builds_of_version<'a>(&'a self, version: &'a str) -> impl Iterator<Item = &'a BuildRecord> {
        self.builds.iter().filter(move |b| b.version == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acl_default_policy() {
        let acl = AclRule::from_node(&ConfigNode::new("acl"));
        assert_eq!(acl.default_policy, AclPolicy::Allow);

        let acl = AclRule::from_node(&ConfigNode::new("acl").with_attr("default", ""));
        assert_eq!(acl.default_policy, AclPolicy::Allow);

        let acl = AclRule::from_node(&ConfigNode::new("acl").with_attr("default", "deny"));
        assert_eq!(acl.default_policy, AclPolicy::Deny);

        // Any non-allow value denies.
        let acl = AclRule::from_node(&ConfigNode::new("acl").with_attr("default", "nobody"));
        assert_eq!(acl.default_policy, AclPolicy::Deny);
    }

    #[test]
    fn test_acl_entries_keep_order() {
        let node = ConfigNode::new("acl")
            .with_child(ConfigNode::new("allow").with_attr("group", "chem"))
            .with_child(ConfigNode::new("deny").with_attr("group", "guests"));
        let acl = AclRule::from_node(&node);
        assert_eq!(acl.entries.len(), 2);
        assert_eq!(acl.entries[1].rule_kind, "deny");
        assert_eq!(acl.entries[1].group, "guests");
    }

    #[test]
    fn test_setup_items() {
        let secret = ConfigNode::new("variable")
            .with_attr("name", "TOKEN")
            .with_attr("value", "abc")
            .with_attr("secret", "true");
        match SetupItem::from_node(&secret) {
            SetupItem::Variable {
                secret,
                value,
                ..
            } => {
                assert!(secret);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected {other:?}"),
        }

        let unknown = SetupItem::from_node(&ConfigNode::new("module"));
        assert_eq!(unknown.tag(), "module");
    }

    #[test]
    fn test_build_without_deps_element() {
        let build = BuildRecord::from_node(
            &ConfigNode::new("build").with_attr("ver", "1.0").with_attr("verindx", "bogus"),
        );
        assert!(build.dependencies.is_none());
        assert!(build.acl.is_none());
        assert_eq!(build.version_index, 0.0);

        let build = BuildRecord::from_node(&ConfigNode::new("build").with_child(ConfigNode::new("deps")));
        assert_eq!(build.dependencies, Some(vec![]));
    }

    #[test]
    fn test_module_from_node() {
        let node = ConfigNode::new("module")
            .with_attr("name", "cp2k")
            .with_child(ConfigNode::new("category").with_attr("name", "chemistry"))
            .with_child(ConfigNode::new("doc").with_text("<p>CP2K</p>"))
            .with_child(
                ConfigNode::new("builds").with_child(
                    ConfigNode::new("build")
                        .with_attr("ver", "8.2")
                        .with_attr("arch", "x86_64")
                        .with_attr("mode", "para")
                        .with_child(ConfigNode::new("acl")),
                ),
            );
        let module = ModuleRecord::from_node(&node);
        assert_eq!(module.categories, vec!["chemistry"]);
        assert_eq!(module.docs.as_ref().map(DocFragment::as_str), Some("<p>CP2K</p>"));
        assert!(module.defaults.is_none());
        assert!(module.has_build_acl());
        assert_eq!(module.builds[0].identifier("cp2k").build_name(), "cp2k:8.2:x86_64:para");
    }
}
