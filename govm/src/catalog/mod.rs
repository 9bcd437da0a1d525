//! Remote release catalog.
//!
//! [`RemoteCatalog`] turns tag feeds into the grouped view the resolver and
//! `ls-remote` work from. Tag lists are fetched at most once per run through
//! a [`TagCache`]. A feed that cannot be reached degrades to an empty list
//! with a warning; a feed that answers with something other than a tag
//! array is an error, since that is how rate limiting shows up.

mod cache;
mod group;
mod tags;

pub use cache::TagCache;
pub use group::{GroupedVersions, group_key, group_label};
pub use tags::{HttpTagSource, Repository, TagSource, parse_tag_refs};

#[cfg(test)]
pub use tags::MockTagSource;

use crate::download::DownloadError;
use thiserror::Error;

/// Errors raised while reading a tag feed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The feed body was not a JSON array of tag references.
    #[error("tag feed is not a JSON array of references: {source}")]
    Malformed {
        /// The JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Anything the resolver can ask for the grouped release list.
pub trait VersionCatalog {
    /// Returns every known release grouped by major.minor.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when release metadata cannot be parsed.
    fn grouped_versions(&mut self) -> Result<GroupedVersions, CatalogError>;
}

impl VersionCatalog for GroupedVersions {
    fn grouped_versions(&mut self) -> Result<GroupedVersions, CatalogError> {
        Ok(self.clone())
    }
}

enum FetchFailure {
    Unreachable(DownloadError),
    Malformed(CatalogError),
}

/// Release catalog backed by a [`TagSource`] and a per-run [`TagCache`].
pub struct RemoteCatalog {
    source: Box<dyn TagSource>,
    cache: TagCache,
}

impl RemoteCatalog {
    /// Creates a catalog with an empty cache.
    #[must_use]
    pub fn new(source: Box<dyn TagSource>) -> Self {
        Self::with_cache(source, TagCache::new())
    }

    /// Creates a catalog that starts from `cache`.
    #[must_use]
    pub fn with_cache(source: Box<dyn TagSource>, cache: TagCache) -> Self {
        Self { source, cache }
    }

    /// Returns the filtered tag names for `repository`.
    ///
    /// An unreachable feed yields an empty list and is retried on the next
    /// call.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the feed body does not parse.
    pub fn fetch_tags(&mut self, repository: Repository) -> Result<Vec<String>, CatalogError> {
        let source = &self.source;
        let fetched = self.cache.get_or_fetch(repository, || {
            let body = source.fetch(repository).map_err(FetchFailure::Unreachable)?;
            parse_tag_refs(&body).map_err(FetchFailure::Malformed)
        });
        match fetched {
            Ok(tags) => Ok(tags),
            Err(FetchFailure::Unreachable(err)) => {
                log::warn!("cannot fetch {repository:?} tags: {err}");
                Ok(Vec::new())
            }
            Err(FetchFailure::Malformed(err)) => Err(err),
        }
    }

    /// Returns every Go release grouped by major.minor.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the feed body does not parse.
    pub fn list_remote_versions(&mut self) -> Result<GroupedVersions, CatalogError> {
        log::info!("fetching remote versions");
        let tags = self.fetch_tags(Repository::Toolchain)?;
        let versions = tags
            .into_iter()
            .map(|tag| tag.strip_prefix("go").map_or_else(|| tag.clone(), str::to_owned));
        Ok(GroupedVersions::from_versions(versions))
    }

    /// Returns govm's newest release tag, the last one in its feed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] when the feed body does not parse.
    pub fn latest_self_release(&mut self) -> Result<Option<String>, CatalogError> {
        Ok(self.fetch_tags(Repository::SelfRelease)?.pop())
    }
}

impl VersionCatalog for RemoteCatalog {
    fn grouped_versions(&mut self) -> Result<GroupedVersions, CatalogError> {
        self.list_remote_versions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use rstest::rstest;

    const TOOLCHAIN_FEED: &str = r#"[
        {"ref": "refs/tags/go1.16"},
        {"ref": "refs/tags/go1.16rc1"},
        {"ref": "refs/tags/go1.16.1"},
        {"ref": "refs/tags/go1.17"},
        {"ref": "refs/tags/weekly.2012-03-27"}
    ]"#;

    fn catalog_with(source: MockTagSource) -> RemoteCatalog {
        RemoteCatalog::new(Box::new(source))
    }

    #[test]
    fn groups_toolchain_tags_without_go_prefix() {
        let mut source = MockTagSource::new();
        source
            .expect_fetch()
            .with(eq(Repository::Toolchain))
            .times(1)
            .returning(|_| Ok(TOOLCHAIN_FEED.to_owned()));
        let mut catalog = catalog_with(source);

        let grouped = catalog.list_remote_versions().expect("catalog parses");

        assert_eq!(grouped.sorted_keys(), ["1.16", "1.17"]);
        assert_eq!(grouped.releases("1.16").expect("group"), ["1.16", "1.16.1", "1.16rc1"]);
    }

    #[test]
    fn fetches_each_repository_once_per_run() {
        let mut source = MockTagSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(TOOLCHAIN_FEED.to_owned()));
        let mut catalog = catalog_with(source);

        let first = catalog.fetch_tags(Repository::Toolchain).expect("first fetch");
        let second = catalog.fetch_tags(Repository::Toolchain).expect("cached fetch");
        assert_eq!(first, second);
    }

    #[test]
    fn unreachable_feed_degrades_to_empty_and_retries() {
        let mut source = MockTagSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(DownloadError::HttpError {
                    url: "https://tags.test".to_owned(),
                    reason: "connection refused".to_owned(),
                })
            });
        source
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(TOOLCHAIN_FEED.to_owned()));
        let mut catalog = catalog_with(source);

        assert!(catalog.fetch_tags(Repository::Toolchain).expect("degrades").is_empty());
        assert_eq!(catalog.fetch_tags(Repository::Toolchain).expect("retry").len(), 4);
    }

    #[test]
    fn malformed_feed_is_an_error() {
        let mut source = MockTagSource::new();
        source
            .expect_fetch()
            .returning(|_| Ok(r#"{"message": "API rate limit exceeded"}"#.to_owned()));
        let mut catalog = catalog_with(source);

        let err = catalog.list_remote_versions().expect_err("rate limit body");
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[rstest]
    #[case::several(r#"[{"ref": "refs/tags/v0.1.0"}, {"ref": "refs/tags/v0.2.0"}]"#, Some("v0.2.0"))]
    #[case::none("[]", None)]
    fn latest_self_release_is_last_tag(#[case] feed: &'static str, #[case] expected: Option<&str>) {
        let mut source = MockTagSource::new();
        source
            .expect_fetch()
            .with(eq(Repository::SelfRelease))
            .returning(move |_| Ok(feed.to_owned()));
        let mut catalog = catalog_with(source);

        let latest = catalog.latest_self_release().expect("feed parses");
        assert_eq!(latest.as_deref(), expected);
    }

    #[test]
    fn prepopulated_cache_avoids_network() {
        let source = MockTagSource::new();
        let cache = TagCache::with_entry(Repository::Toolchain, vec!["go1.18".to_owned()]);
        let mut catalog = RemoteCatalog::with_cache(Box::new(source), cache);

        let grouped = catalog.grouped_versions().expect("cached catalog");
        assert_eq!(grouped.releases("1.18").expect("group"), ["1.18"]);
    }
}
