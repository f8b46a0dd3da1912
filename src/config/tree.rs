//! Immutable labeled tree used to describe the module catalog.
//!
//! A [`ConfigNode`] is an element with a tag, string attributes, optional text
//! and ordered children. Catalog snapshots are stored as JSON-serialized node
//! trees:
//!
//! ```json
//! {
//!   "tag": "module",
//!   "attrs": { "name": "gromacs" },
//!   "children": [
//!     { "tag": "builds", "children": [
//!       { "tag": "build", "attrs": { "ver": "2021.4", "arch": "x86_64", "mode": "single", "verindx": "2021.04" } }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Lookups never mutate the tree. The builder methods (`with_*`) consume the
//! node and exist only for constructing snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// One element of the catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Builder: set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: append a child element.
    #[must_use]
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: append several child elements in order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = ConfigNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    /// First child element with the given tag.
    pub fn first_child(&self, tag: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Child elements with the given tag, in document order.
    pub fn children_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ConfigNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Follow a `/`-separated path of tags, taking the first match at each step.
    ///
    /// An empty path returns `self`.
    pub fn child_by_path(&self, path: &str) -> Option<&ConfigNode> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.first_child(segment))
    }

    /// All elements matching the last path segment under the first element
    /// matching the preceding segments.
    ///
    /// `children_by_path("builds/build")` yields every `build` of the first
    /// `builds` element.
    pub fn children_by_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ConfigNode> {
        let (parent_path, leaf) = match path.rsplit_once('/') {
            Some((parent, leaf)) => (parent, leaf),
            None => ("", path),
        };
        self.child_by_path(parent_path)
            .into_iter()
            .flat_map(move |parent| parent.children_by_tag(leaf))
    }

    /// Raw attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attribute parsed into `T`; `None` when missing or unparsable.
    pub fn attribute<T: FromStr>(&self, name: &str) -> Option<T> {
        self.attr(name).and_then(|v| v.trim().parse().ok())
    }

    /// Attribute parsed into `T`, falling back to `default`.
    pub fn attribute_or<T: FromStr>(&self, name: &str, default: T) -> T {
        self.attribute(name).unwrap_or(default)
    }

    /// Attribute as an owned string, empty when missing.
    pub fn attr_string(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module() -> ConfigNode {
        ConfigNode::new("module").with_attr("name", "cp2k").with_child(
            ConfigNode::new("builds")
                .with_child(ConfigNode::new("build").with_attr("ver", "8.2").with_attr("verindx", "8.02"))
                .with_child(ConfigNode::new("note"))
                .with_child(ConfigNode::new("build").with_attr("ver", "9.1")),
        )
    }

    #[test]
    fn test_child_by_path() {
        let node = module();
        let build = node.child_by_path("builds/build").unwrap();
        assert_eq!(build.attr("ver"), Some("8.2"));
        assert!(node.child_by_path("builds/missing").is_none());
        assert_eq!(node.child_by_path("").unwrap().tag(), "module");
    }

    #[test]
    fn test_children_by_path_skips_other_tags() {
        let node = module();
        let versions: Vec<_> = node.children_by_path("builds/build").map(|b| b.attr_string("ver")).collect();
        assert_eq!(versions, vec!["8.2", "9.1"]);
        assert_eq!(node.children_by_path("nothing/build").count(), 0);
    }

    #[test]
    fn test_typed_attributes() {
        let node = module();
        let build = node.child_by_path("builds/build").unwrap();
        assert_eq!(build.attribute::<f64>("verindx"), Some(8.02));
        assert_eq!(build.attribute::<f64>("ver"), Some(8.2));
        assert_eq!(build.attribute_or::<bool>("secret", false), false);
        assert_eq!(node.attribute::<u32>("name"), None);
    }

    #[test]
    fn test_json_roundtrip_omits_empty_parts() {
        let node = ConfigNode::new("doc").with_text("hello");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"tag":"doc","text":"hello"}"#);
        let back: ConfigNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
