//! Resolution of version tokens to concrete releases.
//!
//! Exact tokens resolve without touching the network. Everything else asks
//! the [`VersionCatalog`] for the grouped release list, once per call.

use crate::catalog::{GroupedVersions, VersionCatalog};
use crate::error::{GovmError, Result};
use crate::token::{TokenError, VersionToken};
use crate::version::is_pre_release;

/// Resolves `token` to the release it names.
///
/// * An exact release is returned unchanged.
/// * `X.Y`, `X.Y.x` and `X.Yx` pick the newest final release of group
///   `X.Y`, falling back to `X.Y` itself when the group is unknown or has
///   no final release.
/// * `X.Y@latest` picks the newest final release of the group.
/// * `X.Y@dev-latest` picks the newest release of the group, pre-releases
///   included.
/// * `latest` picks the newest final release overall, or the newest group
///   key when every group holds only pre-releases.
/// * `dev-latest` picks the newest release overall.
///
/// Unlike bare `X.Y`, the suffixed forms do not fall back to the prefix
/// when the group is missing. The caller asked for a catalog answer, so an
/// empty answer is reported as [`GovmError::NoMatchingRelease`] here rather
/// than surfacing later as a failed download or a missing install.
///
/// # Errors
///
/// Returns [`GovmError::MissingVersion`] for an empty token,
/// [`GovmError::InvalidVersion`] for an ambiguous one,
/// [`GovmError::MalformedCatalog`] when the catalog cannot be read and
/// [`GovmError::NoMatchingRelease`] when a `@latest`, `@dev-latest`,
/// `latest` or `dev-latest` token matches nothing.
///
/// # Examples
///
/// ```
/// use govm::catalog::GroupedVersions;
/// use govm::resolver::resolve;
///
/// let mut catalog = GroupedVersions::from_versions(["1.16", "1.16.1", "1.16rc1", "1.17"]);
/// assert_eq!(resolve("1.16.x", &mut catalog).expect("resolves"), "1.16.1");
/// assert_eq!(resolve("dev-latest", &mut catalog).expect("resolves"), "1.17");
/// ```
pub fn resolve(token: &str, catalog: &mut dyn VersionCatalog) -> Result<String> {
    let parsed: VersionToken = token.parse().map_err(|err| match err {
        TokenError::Empty => GovmError::MissingVersion,
        other => GovmError::InvalidVersion(other),
    })?;
    if let VersionToken::Exact(version) = &parsed {
        log::debug!("{version} is an exact version");
        return Ok(version.clone());
    }

    let grouped = catalog.grouped_versions()?;
    let resolved = match &parsed {
        VersionToken::Exact(version) => Some(version.clone()),
        VersionToken::MajorMinor(prefix) => Some(
            grouped
                .releases(prefix)
                .and_then(newest_final)
                .unwrap_or_else(|| prefix.clone()),
        ),
        VersionToken::MajorMinorLatest(prefix) => grouped.releases(prefix).and_then(newest_final),
        VersionToken::MajorMinorDevLatest(prefix) => grouped
            .releases(prefix)
            .and_then(|releases| releases.last().cloned()),
        VersionToken::Latest => latest_final(&grouped),
        VersionToken::DevLatest => newest_any(&grouped),
    };

    let version = resolved.ok_or_else(|| GovmError::NoMatchingRelease {
        token: parsed.to_string(),
    })?;
    log::debug!("resolved {token} to {version}");
    Ok(version)
}

/// Scans a group from its newest entry backwards for a final release.
fn newest_final(releases: &[String]) -> Option<String> {
    releases
        .iter()
        .rev()
        .find(|version| !is_pre_release(version))
        .cloned()
}

fn latest_final(grouped: &GroupedVersions) -> Option<String> {
    let keys = grouped.sorted_keys();
    let found = keys
        .iter()
        .rev()
        .filter_map(|key| grouped.releases(key))
        .find_map(newest_final);
    // Only pre-releases anywhere: settle on the newest group key.
    found.or_else(|| keys.last().map(|key| (*key).to_owned()))
}

fn newest_any(grouped: &GroupedVersions) -> Option<String> {
    grouped
        .sorted_keys()
        .into_iter()
        .rev()
        .filter_map(|key| grouped.releases(key))
        .find_map(|releases| releases.last().cloned())
}
