//! Version comparison for vendor-specific SDK version spellings
//!
//! SDK vendors do not follow semver. Two conventions dominate:
//! - dotted with build metadata: `11.0.26_4`, `11.0.29.7.1`, `17.0.11+7.1`
//! - legacy update style: `8u442b06`
//!
//! Both are normalized to dot-separated parts before comparison.

use std::cmp::Ordering;

/// Extract the major version token from a version string.
///
/// Examples:
/// - "11.0.26_4" -> Some("11")
/// - "8u442b06" -> Some("8")
/// - "jdk-17.0.11" -> Some("17")
/// - "21" -> None (a bare number is not treated as a version)
/// - "" -> None
pub fn extract_major(version: &str) -> Option<&str> {
    if version.is_empty() {
        return None;
    }

    if let Some(major) = leading_major(version) {
        return Some(major);
    }

    // Retry after dropping an alphabetic prefix such as "jdk-" or "jdk_"
    let cleaned =
        version.trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '-' || c == '_');

    if !cleaned.contains('.') && !cleaned.contains('u') {
        return None;
    }

    let head = cleaned.split('.').next().unwrap_or_default();
    let major = head.split('u').next().unwrap_or_default();
    is_number(major).then_some(major)
}

/// Leading digits followed by a `.` or `u` separator.
fn leading_major(version: &str) -> Option<&str> {
    let digits = version.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    match version.as_bytes().get(digits) {
        Some(b'.') | Some(b'u') => Some(&version[..digits]),
        _ => None,
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Order two version strings.
///
/// `u` and `_` are rewritten to `.`, then parts are compared left to right:
/// numerically when both parts are integers, lexicographically otherwise.
/// When every shared part is equal the version with fewer parts is older,
/// so "21.0.6" < "21.0.6_7".
///
/// Only versions from the same distribution should be compared; the ordering
/// is not transitive across unrelated vendor formats.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts = normalized_parts(a);
    let b_parts = normalized_parts(b);

    for (x, y) in a_parts.iter().zip(&b_parts) {
        let ordering = match (x.parse::<i64>(), y.parse::<i64>()) {
            (Ok(n1), Ok(n2)) => n1.cmp(&n2),
            _ => x.cmp(y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

/// Returns true if `a` is older than `b`.
pub fn is_older(a: &str, b: &str) -> bool {
    compare_versions(a, b) == Ordering::Less
}

fn normalized_parts(version: &str) -> Vec<String> {
    version
        .replace(['u', '_'], ".")
        .split('.')
        .map(str::to_string)
        .collect()
}
