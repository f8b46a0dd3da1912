//! In-memory catalog built from a tree snapshot.

use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

use super::Catalog;
use crate::config::ConfigNode;
use crate::core::RepoError;
use crate::models::ModuleRecord;

/// A catalog tree as stored on disk: a root element whose `module`
/// children describe the modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    root: ConfigNode,
}

impl CatalogSnapshot {
    pub fn new(root: ConfigNode) -> Self {
        Self {
            root,
        }
    }

    /// Read a JSON snapshot file.
    pub async fn load_from(path: &Path) -> Result<Self, RepoError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Parse snapshot JSON; `source` names the input in errors.
    pub fn from_json(content: &str, source: &str) -> Result<Self, RepoError> {
        let root: ConfigNode = serde_json::from_str(content).map_err(|e| RepoError::CatalogParseError {
            file: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &ConfigNode {
        &self.root
    }

    /// Decode all modules into a [`ModuleCache`].
    pub fn to_cache(&self) -> ModuleCache {
        ModuleCache::from_tree(&self.root)
    }
}

/// Decoded modules indexed by name.
#[derive(Debug, Clone, Default)]
pub struct ModuleCache {
    modules: Vec<ModuleRecord>,
    index: HashMap<String, usize>,
}

impl ModuleCache {
    /// Decode the `module` children of `root`.
    ///
    /// Modules without a name are skipped. When a name repeats, the first
    /// definition is kept.
    pub fn from_tree(root: &ConfigNode) -> Self {
        let mut cache = Self::default();
        for node in root.children_by_tag("module") {
            let record = ModuleRecord::from_node(node);
            if record.name.is_empty() {
                tracing::warn!("Skipping catalog module without a name");
                continue;
            }
            cache.insert(record);
        }
        tracing::debug!("Catalog holds {} modules", cache.len());
        cache
    }

    fn insert(&mut self, record: ModuleRecord) {
        if self.index.contains_key(&record.name) {
            tracing::warn!("Duplicate catalog module '{}' ignored", record.name);
            return;
        }
        self.index.insert(record.name.clone(), self.modules.len());
        self.modules.push(record);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Catalog for ModuleCache {
    fn module(&self, name: &str) -> Option<&ModuleRecord> {
        self.index.get(name).map(|&i| &self.modules[i])
    }

    fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_catalog;
    use tempfile::tempdir;

    #[test]
    fn test_lookup_and_build() {
        let cache = sample_catalog();
        assert!(cache.module("gromacs").is_some());
        assert!(cache.module("nope").is_none());
        let build = cache.build("gromacs", "2021.4", "x86_64", "para").unwrap();
        assert!(build.acl.is_some());
        assert!(cache.build("gromacs", "2021.4", "x86_64", "gpu").is_none());
    }

    #[test]
    fn test_categories_sorted_without_system() {
        let cache = sample_catalog();
        assert_eq!(cache.categories(), ["chemistry", "physics"]);
    }

    #[test]
    fn test_modules_in_category() {
        let cache = sample_catalog();
        let chem: Vec<_> = cache.modules_in_category("chemistry", false).into_iter().collect();
        assert_eq!(chem, ["cp2k", "gromacs"]);

        let sys: Vec<_> = cache.modules_in_category("sys", false).into_iter().collect();
        assert_eq!(sys, ["cmake"]);

        let with_versions: Vec<_> = cache.modules_in_category("physics", true).into_iter().collect();
        assert_eq!(with_versions, ["gromacs:2020.1", "gromacs:2021.4"]);
    }

    #[test]
    fn test_module_defaults() {
        let cache = sample_catalog();
        let explicit = cache.module_defaults("gromacs").unwrap();
        assert_eq!(explicit.version, "2021.4");
        assert_eq!(explicit.architecture, "x86_64");

        // No default element: latest version, open architecture and mode.
        let derived = cache.module_defaults("cp2k").unwrap();
        assert_eq!(derived.version, "9.1");
        assert!(derived.architecture.is_empty());
        assert!(cache.module_defaults("nope").is_none());
    }

    #[test]
    fn test_sorted_build_labels() {
        let cache = sample_catalog();
        assert_eq!(
            cache.sorted_build_labels("gromacs", "2021.4"),
            ["2021.4:x86_64:para", "2021.4:x86_64:single"]
        );
        assert!(cache.sorted_build_labels("gromacs", "1.0").is_empty());
    }

    #[test]
    fn test_duplicate_and_unnamed_modules() {
        let root = ConfigNode::new("catalog")
            .with_child(ConfigNode::new("module").with_attr("name", "a").with_child(ConfigNode::new("doc").with_text("first")))
            .with_child(ConfigNode::new("module").with_attr("name", "a").with_child(ConfigNode::new("doc").with_text("second")))
            .with_child(ConfigNode::new("module"));
        let cache = ModuleCache::from_tree(&root);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.module_documentation("a").map(|d| d.as_str()), Some("first"));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_through_file() {
        let root = ConfigNode::new("catalog").with_child(ConfigNode::new("module").with_attr("name", "fftw"));
        let temp = tempdir().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&root).unwrap()).unwrap();

        let snapshot = CatalogSnapshot::load_from(&path).await.unwrap();
        assert_eq!(snapshot.root(), &root);
        assert!(snapshot.to_cache().module("fftw").is_some());
    }

    #[tokio::test]
    async fn test_snapshot_errors() {
        let temp = tempdir().unwrap();
        let missing = CatalogSnapshot::load_from(&temp.path().join("missing.json")).await.unwrap_err();
        assert!(matches!(missing, RepoError::IoError(_)));

        let err = CatalogSnapshot::from_json("{ not json", "inline").unwrap_err();
        assert!(matches!(err, RepoError::CatalogParseError { ref file, .. } if file == "inline"));
    }
}
