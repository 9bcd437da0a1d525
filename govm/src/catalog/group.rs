//! Grouping of Go releases by major.minor.
//!
//! Every release with a minor component lands in one group keyed by its
//! first two numeric components (`1.16.1` and `1.16rc1` both belong to
//! `1.16`). Within a group
//! final releases come first in ascending order, followed by pre-releases in
//! the order the tag feed listed them.

use crate::version::{compare, is_pre_release, parse_lenient, pre_release_marker};
use semver::Version;
use std::collections::HashMap;

/// Returns the group key for a release.
///
/// The key is `<major>.<minor>` with any pre-release marker cut off.
/// Releases without a minor component (the `go1` tag) belong to no group.
///
/// # Examples
///
/// ```
/// use govm::catalog::group_key;
///
/// assert_eq!(group_key("1.16.1").as_deref(), Some("1.16"));
/// assert_eq!(group_key("1.16rc1").as_deref(), Some("1.16"));
/// assert_eq!(group_key("1"), None);
/// assert_eq!(group_key(""), None);
/// ```
#[must_use]
pub fn group_key(version: &str) -> Option<String> {
    let numeric = pre_release_marker(version).map_or(version, |idx| &version[..idx]);
    let mut parts = numeric.split('.');
    let major = parts.next().filter(|part| !part.is_empty())?;
    let minor = parts.next().filter(|part| !part.is_empty())?;
    Some(format!("{major}.{minor}"))
}

/// Display label for a group key: `N.0` groups are shown as `N`.
///
/// # Examples
///
/// ```
/// use govm::catalog::group_label;
///
/// assert_eq!(group_label("1.0"), "1");
/// assert_eq!(group_label("1.10"), "1.10");
/// ```
#[must_use]
pub fn group_label(key: &str) -> &str {
    match key.split_once('.') {
        Some((major, "0")) => major,
        _ => key,
    }
}

/// Remote releases bucketed by group key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedVersions {
    groups: HashMap<String, Vec<String>>,
}

impl GroupedVersions {
    /// Groups `versions`, preserving the discovery order of pre-releases.
    #[must_use]
    pub fn from_versions<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();
        for version in versions {
            let version = version.into();
            if let Some(key) = group_key(&version) {
                groups.entry(key).or_default().push(version);
            }
        }
        for releases in groups.values_mut() {
            order_group(releases);
        }
        Self { groups }
    }

    /// Releases in the group `key`, finals ascending then pre-releases.
    #[must_use]
    pub fn releases(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Returns `true` when no release was grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group keys that parse as versions, oldest first.
    ///
    /// Keys that do not parse stay reachable through [`Self::releases`] but
    /// are left out of this ordering.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keyed: Vec<(Version, &str)> = self
            .groups
            .keys()
            .filter_map(|key| parse_lenient(key).map(|parsed| (parsed, key.as_str())))
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, key)| key).collect()
    }

    /// Groups with their releases, oldest group first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sorted_keys()
            .into_iter()
            .filter_map(|key| self.releases(key).map(|releases| (key, releases)))
    }
}

fn order_group(releases: &mut Vec<String>) {
    let (mut finals, pre_releases): (Vec<String>, Vec<String>) = releases
        .drain(..)
        .partition(|version| !is_pre_release(version));
    finals.sort_by(|a, b| compare(a, b));
    finals.extend(pre_releases);
    *releases = finals;
}
