//! Go release version strings.
//!
//! Go names its releases `1.16`, `1.16.1`, `1.17rc1` or `1.18beta2`: one to
//! three numeric components, optionally followed by a pre-release marker.
//! These helpers classify such strings and order them the way semantic
//! versions order, without requiring the strict three-component form that
//! [`semver::Version::parse`] insists on.

use semver::{Prerelease, Version};
use std::cmp::Ordering;

const PRE_RELEASE_MARKERS: [&str; 2] = ["rc", "beta"];

/// Returns the byte offset of the pre-release marker (`rc` or `beta`
/// followed by at least one digit), if the version has one.
///
/// # Examples
///
/// ```
/// use govm::version::pre_release_marker;
///
/// assert_eq!(pre_release_marker("1.16rc1"), Some(4));
/// assert_eq!(pre_release_marker("1.9beta2"), Some(3));
/// assert_eq!(pre_release_marker("1.16.1"), None);
/// ```
#[must_use]
pub fn pre_release_marker(version: &str) -> Option<usize> {
    PRE_RELEASE_MARKERS
        .iter()
        .flat_map(|marker| {
            version.match_indices(marker).filter_map(move |(idx, _)| {
                version
                    .get(idx + marker.len()..)
                    .and_then(|rest| rest.chars().next())
                    .filter(char::is_ascii_digit)
                    .map(|_| idx)
            })
        })
        .min()
}

/// Returns `true` for release candidates and betas.
#[must_use]
pub fn is_pre_release(version: &str) -> bool {
    pre_release_marker(version).is_some()
}

/// Parses a Go version leniently into a semantic version.
///
/// Missing minor and patch components default to zero and a pre-release
/// suffix becomes the semver pre-release identifier. Returns `None` for
/// anything that is not one to three numeric components.
///
/// # Examples
///
/// ```
/// use govm::version::parse_lenient;
///
/// assert_eq!(parse_lenient("1.16").map(|v| v.to_string()), Some("1.16.0".to_owned()));
/// assert_eq!(parse_lenient("1.17rc1").map(|v| v.to_string()), Some("1.17.0-rc1".to_owned()));
/// assert!(parse_lenient("weekly.2012-03-27").is_none());
/// ```
#[must_use]
pub fn parse_lenient(version: &str) -> Option<Version> {
    let (numeric, pre) = match pre_release_marker(version) {
        Some(idx) => (version.get(..idx)?, version.get(idx..)),
        None => (version, None),
    };

    let mut parts = [0_u64; 3];
    let mut count = 0;
    for component in numeric.split('.') {
        let slot = parts.get_mut(count)?;
        if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        *slot = component.parse().ok()?;
        count += 1;
    }

    let [major, minor, patch] = parts;
    let mut parsed = Version::new(major, minor, patch);
    if let Some(pre) = pre {
        parsed.pre = Prerelease::new(pre).ok()?;
    }
    Some(parsed)
}

/// Orders two version strings by their lenient semantic version.
///
/// Strings that do not parse sort after those that do, keeping their
/// relative order.
#[must_use]
pub fn compare(left: &str, right: &str) -> Ordering {
    match (parse_lenient(left), parse_lenient(right)) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
