//! Read-only access to the module catalog.
//!
//! Page assemblers only see the catalog through the [`Catalog`] trait. The
//! crate ships one implementation, [`ModuleCache`], built from a catalog tree
//! snapshot; a server embedding the engine can put its own module bundle
//! behind the same trait.
//!
//! Only [`Catalog::module`] and [`Catalog::module_names`] are required; the
//! remaining queries have default implementations in terms of those two.

mod cache;

pub use cache::{CatalogSnapshot, ModuleCache};

use std::collections::BTreeSet;

use crate::constants::SYSTEM_CATEGORY;
use crate::models::{BuildRecord, DocFragment, ModuleDefaults, ModuleRecord};
use crate::version::{VersionComparator, VersionRecord};

/// Lookup interface over an immutable catalog snapshot.
pub trait Catalog {
    /// Module by exact name.
    fn module(&self, name: &str) -> Option<&ModuleRecord>;

    /// Names of all modules, in catalog order.
    fn module_names(&self) -> Vec<&str>;

    /// Build by its full `(version, architecture, mode)` key.
    fn build(&self, module: &str, version: &str, architecture: &str, mode: &str) -> Option<&BuildRecord> {
        self.module(module)?.builds.iter().find(|b| b.matches(version, architecture, mode))
    }

    /// Declared category names, sorted and unique.
    ///
    /// The system category is not listed; modules without a category are
    /// reached through `modules_in_category("sys", ..)`.
    fn categories(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .module_names()
            .into_iter()
            .filter_map(|name| self.module(name))
            .flat_map(|module| module.categories.iter().cloned())
            .filter(|category| category != SYSTEM_CATEGORY)
            .collect();
        set.into_iter().collect()
    }

    /// Members of `category`, sorted and unique.
    ///
    /// With `include_versions` every distinct version is listed as
    /// `name:version` instead of the bare module name.
    fn modules_in_category(&self, category: &str, include_versions: bool) -> BTreeSet<String> {
        let mut members = BTreeSet::new();
        for module in self.module_names().into_iter().filter_map(|name| self.module(name)) {
            let in_category = if module.categories.is_empty() {
                category == SYSTEM_CATEGORY
            } else {
                module.categories.iter().any(|c| c == category)
            };
            if !in_category {
                continue;
            }
            if include_versions {
                members.extend(module.builds.iter().map(|b| format!("{}:{}", module.name, b.version)));
            } else {
                members.insert(module.name.clone());
            }
        }
        members
    }

    /// Default build of a module.
    ///
    /// Without an explicit `default` element the latest version is used, with
    /// architecture and mode left open.
    fn module_defaults(&self, module: &str) -> Option<ModuleDefaults> {
        let record = self.module(module)?;
        if let Some(defaults) = &record.defaults {
            return Some(defaults.clone());
        }
        let latest = VersionComparator::sorted_unique(record.builds.iter().map(VersionRecord::from))
            .into_iter()
            .next()
            .map(|v| v.version)
            .unwrap_or_default();
        Some(ModuleDefaults {
            version: latest,
            ..ModuleDefaults::default()
        })
    }

    /// `version:architecture:mode` labels of every build of `version`, sorted
    /// and unique.
    fn sorted_build_labels(&self, module: &str, version: &str) -> Vec<String> {
        let Some(record) = self.module(module) else {
            return Vec::new();
        };
        let labels: BTreeSet<String> = record.builds_of_version(version).map(BuildRecord::label).collect();
        labels.into_iter().collect()
    }

    fn module_documentation(&self, module: &str) -> Option<&DocFragment> {
        self.module(module)?.docs.as_ref()
    }
}
