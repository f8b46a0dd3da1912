//! Version ordering for module pages.
//!
//! Module versions are displayed latest first, with duplicates collapsed and
//! everything past a configurable number of versions classified as old. See
//! [`VersionComparator`] for the exact ordering rules.

pub mod comparison;

pub use comparison::{RankedVersion, VersionClass, VersionComparator, VersionListing, VersionRecord};
