//! Latest-first ordering of module versions.
//!
//! Builds carry a version label (`"2021.4"`) and a numeric version index
//! (`verindx`) maintained by the catalog. Labels are never parsed: only the
//! index decides which version is newer, and the label is a tie breaker.
//!
//! # Examples
//!
//! ```rust
//! use isoftrepo::version::{VersionClass, VersionComparator, VersionRecord};
//!
//! let builds = vec![
//!     VersionRecord::new("1.0", 1.0),
//!     VersionRecord::new("2.0", 5.0),
//!     VersionRecord::new("2.0", 2.0),
//! ];
//!
//! let listing = VersionComparator::rank(builds, 5);
//! let labels: Vec<_> = listing.versions.iter().map(|v| v.version.as_str()).collect();
//! assert_eq!(labels, ["2.0", "1.0"]);
//! assert_eq!(listing.versions[0].class, VersionClass::Recent);
//! assert!(!listing.show_old);
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::BuildRecord;

/// A version label with its sort index.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRecord {
    pub version: String,
    pub version_index: f64,
}

impl VersionRecord {
    pub fn new(version: impl Into<String>, version_index: f64) -> Self {
        Self {
            version: version.into(),
            version_index,
        }
    }
}

impl From<&BuildRecord> for VersionRecord {
    fn from(build: &BuildRecord) -> Self {
        Self::new(build.version.clone(), build.version_index)
    }
}

/// Display class of a ranked version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionClass {
    /// Within the recent-version limit.
    Recent,
    /// Ranked past the limit; hidden until the user expands older versions.
    Old,
}

impl VersionClass {
    /// CSS class used by the module template.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "new",
            Self::Old => "old",
        }
    }
}

/// One distinct version after ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVersion {
    pub version: String,
    pub version_index: f64,
    /// 1-based position in the latest-first order.
    pub rank: usize,
    pub class: VersionClass,
}

/// Result of [`VersionComparator::rank`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionListing {
    pub versions: Vec<RankedVersion>,
    /// True when at least one version is classified [`VersionClass::Old`].
    pub show_old: bool,
}

/// Version ordering for latest-first display.
pub struct VersionComparator;

impl VersionComparator {
    /// Pairwise ordering, latest first.
    ///
    /// 1. Identical labels compare equal, whatever their indices.
    /// 2. A higher version index sorts first.
    /// 3. Equal indices sort by label, reverse lexicographically.
    pub fn compare(a: &VersionRecord, b: &VersionRecord) -> Ordering {
        if a.version == b.version {
            return Ordering::Equal;
        }
        b.version_index.total_cmp(&a.version_index).then_with(|| b.version.cmp(&a.version))
    }

    /// Sort latest first and collapse duplicate labels.
    ///
    /// A label shared by several builds is represented by its highest index
    /// (the first occurrence wins a tie). Collapsing happens before sorting so
    /// the ordering works on distinct labels, where [`Self::compare`] is a
    /// total order.
    pub fn sorted_unique(records: impl IntoIterator<Item = VersionRecord>) -> Vec<VersionRecord> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut unique: Vec<VersionRecord> = Vec::new();

        for record in records {
            match positions.get(&record.version) {
                Some(&pos) => {
                    if record.version_index > unique[pos].version_index {
                        unique[pos].version_index = record.version_index;
                    }
                }
                None => {
                    positions.insert(record.version.clone(), unique.len());
                    unique.push(record);
                }
            }
        }

        unique.sort_by(Self::compare);
        unique
    }

    /// Sort, deduplicate and classify versions against `recent_limit`.
    pub fn rank(records: impl IntoIterator<Item = VersionRecord>, recent_limit: usize) -> VersionListing {
        let versions: Vec<RankedVersion> = Self::sorted_unique(records)
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let rank = i + 1;
                RankedVersion {
                    version: record.version,
                    version_index: record.version_index,
                    rank,
                    class: if rank > recent_limit {
                        VersionClass::Old
                    } else {
                        VersionClass::Recent
                    },
                }
            })
            .collect();

        let show_old = versions.len() > recent_limit;
        VersionListing {
            versions,
            show_old,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(records: &[VersionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.version.as_str()).collect()
    }

    #[test]
    fn test_compare_rules() {
        let a = VersionRecord::new("2.0", 5.0);
        let b = VersionRecord::new("2.0", 1.0);
        assert_eq!(VersionComparator::compare(&a, &b), Ordering::Equal);

        let newer = VersionRecord::new("1.0", 9.0);
        assert_eq!(VersionComparator::compare(&newer, &a), Ordering::Less);
        assert_eq!(VersionComparator::compare(&a, &newer), Ordering::Greater);

        // Index tie: reverse lexicographic.
        let x = VersionRecord::new("b", 1.0);
        let y = VersionRecord::new("a", 1.0);
        assert_eq!(VersionComparator::compare(&x, &y), Ordering::Less);
    }

    #[test]
    fn test_dedup_example() {
        let sorted = VersionComparator::sorted_unique(vec![
            VersionRecord::new("1.0", 1.0),
            VersionRecord::new("2.0", 5.0),
            VersionRecord::new("2.0", 2.0),
        ]);
        assert_eq!(labels(&sorted), ["2.0", "1.0"]);
        assert_eq!(sorted[0].version_index, 5.0);
    }

    #[test]
    fn test_representative_takes_highest_index() {
        // The low-index duplicate comes first; the representative still sorts
        // by the higher index.
        let sorted = VersionComparator::sorted_unique(vec![
            VersionRecord::new("2.0", 1.0),
            VersionRecord::new("1.0", 3.0),
            VersionRecord::new("2.0", 7.0),
        ]);
        assert_eq!(labels(&sorted), ["2.0", "1.0"]);
        assert_eq!(sorted[0].version_index, 7.0);
    }

    #[test]
    fn test_sorting_is_deterministic_across_input_orders() {
        let mut input = vec![
            VersionRecord::new("3.1", 3.0),
            VersionRecord::new("3.0", 3.0),
            VersionRecord::new("1.0", 1.0),
            VersionRecord::new("3.1", 2.0),
        ];
        let first = VersionComparator::sorted_unique(input.clone());
        input.reverse();
        let second = VersionComparator::sorted_unique(input);
        assert_eq!(first, second);
        assert_eq!(labels(&first), ["3.1", "3.0", "1.0"]);
    }

    #[test]
    fn test_recent_and_old_classification() {
        let records = (1..=7).map(|i| VersionRecord::new(format!("{i}.0"), f64::from(i)));
        let listing = VersionComparator::rank(records, 5);

        assert_eq!(listing.versions.len(), 7);
        assert!(listing.show_old);
        assert_eq!(listing.versions[0].version, "7.0");
        for v in &listing.versions[..5] {
            assert_eq!(v.class, VersionClass::Recent);
        }
        for v in &listing.versions[5..] {
            assert_eq!(v.class, VersionClass::Old);
            assert_eq!(v.class.as_str(), "old");
        }
        assert_eq!(listing.versions[6].rank, 7);
    }

    #[test]
    fn test_exactly_limit_versions_hides_toggle() {
        let records = (1..=5).map(|i| VersionRecord::new(format!("{i}"), f64::from(i)));
        let listing = VersionComparator::rank(records, 5);
        assert!(!listing.show_old);
        assert!(listing.versions.iter().all(|v| v.class == VersionClass::Recent));
    }

    #[test]
    fn test_empty_input() {
        let listing = VersionComparator::rank(Vec::new(), 5);
        assert!(listing.versions.is_empty());
        assert!(!listing.show_old);
    }
}
