//! Data model of the module catalog.
//!
//! - [`ModuleIdentifier`] - parsed `name:version:architecture:mode` tokens
//! - [`ModuleRecord`] / [`BuildRecord`] - catalog entries decoded from the
//!   catalog tree, together with their access lists, dependency edges and
//!   setup items
//!
//! All records are immutable snapshots: they are decoded once when a catalog
//! is loaded and only read afterwards.

mod identifier;
mod records;

pub use identifier::ModuleIdentifier;
pub use records::{
    AclEntry, AclPolicy, AclRule, BuildRecord, DependencyEdge, DocFragment, ModuleDefaults,
    ModuleRecord, SetupItem,
};
