//! Major-version grouping for human-facing version lists
//!
//! The resolver orders assets by plain string comparison. Display code
//! instead groups versions by major and orders each group with
//! [`is_older`], oldest first.

use std::collections::BTreeMap;

use crate::version::compare::{extract_major, is_older};
use crate::version::types::ResolvedAsset;

/// Versions sharing one major version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorGroup {
    pub major: u64,
    /// Versions ordered oldest to newest
    pub versions: Vec<String>,
}

/// Group versions by numeric major, groups in ascending major order.
///
/// Versions without a numeric major are left out.
pub fn group_by_major(assets: &[ResolvedAsset]) -> Vec<MajorGroup> {
    let mut groups: BTreeMap<u64, Vec<String>> = BTreeMap::new();

    for asset in assets {
        if let Some(major) = numeric_major(&asset.version) {
            groups.entry(major).or_default().push(asset.version.clone());
        }
    }

    groups
        .into_iter()
        .map(|(major, mut versions)| {
            sort_oldest_first(&mut versions);
            MajorGroup { major, versions }
        })
        .collect()
}

/// Distinct numeric majors present in `assets`, ascending
pub fn available_majors(assets: &[ResolvedAsset]) -> Vec<u64> {
    let mut majors: Vec<u64> = assets
        .iter()
        .filter_map(|asset| numeric_major(&asset.version))
        .collect();
    majors.sort_unstable();
    majors.dedup();
    majors
}

/// Keep assets whose major version equals `major`
pub fn filter_by_major(assets: &[ResolvedAsset], major: &str) -> Vec<ResolvedAsset> {
    assets
        .iter()
        .filter(|asset| extract_major(&asset.version) == Some(major))
        .cloned()
        .collect()
}

/// Stable insertion sort by [`is_older`].
///
/// The comparison is not transitive once numeric and non-numeric parts meet
/// in the same position (`17.0.9`, `17.0.10`, `17.0.10+1` form a cycle), and
/// `slice::sort_by` panics on such comparators. Afterwards no version is
/// older than its left neighbour.
fn sort_oldest_first(versions: &mut [String]) {
    for i in 1..versions.len() {
        let mut j = i;
        while j > 0 && is_older(&versions[j], &versions[j - 1]) {
            versions.swap(j, j - 1);
            j -= 1;
        }
    }
}

fn numeric_major(version: &str) -> Option<u64> {
    extract_major(version)?.parse().ok()
}
