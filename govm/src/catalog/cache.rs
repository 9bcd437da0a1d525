//! Per-run cache of fetched tag lists.

use super::tags::Repository;
use std::collections::HashMap;

/// Tag lists keyed by repository, filled at most once per repository.
///
/// A cache is created for each run and handed to the catalog, so a second
/// lookup in the same run never repeats the network request. Failed fetches
/// are not stored.
#[derive(Debug, Clone, Default)]
pub struct TagCache {
    entries: HashMap<Repository, Vec<String>>,
}

impl TagCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-populated with `tags` for `repository`.
    #[must_use]
    pub fn with_entry(repository: Repository, tags: Vec<String>) -> Self {
        let mut cache = Self::new();
        cache.entries.insert(repository, tags);
        cache
    }

    /// Returns the cached tags for `repository`, calling `fetch` on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the error from `fetch`; nothing is cached in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use govm::catalog::{Repository, TagCache};
    ///
    /// let mut cache = TagCache::new();
    /// let first = cache.get_or_fetch(Repository::Toolchain, || {
    ///     Ok::<_, ()>(vec!["go1.16".to_owned()])
    /// });
    /// let second = cache.get_or_fetch(Repository::Toolchain, || Err(()));
    /// assert_eq!(first, second);
    /// ```
    pub fn get_or_fetch<E, F>(&mut self, repository: Repository, fetch: F) -> Result<Vec<String>, E>
    where
        F: FnOnce() -> Result<Vec<String>, E>,
    {
        if let Some(tags) = self.entries.get(&repository) {
            log::trace!("tag cache hit for {repository:?}");
            return Ok(tags.clone());
        }
        let tags = fetch()?;
        self.entries.insert(repository, tags.clone());
        Ok(tags)
    }

    /// Returns `true` when tags for `repository` are cached.
    #[must_use]
    pub fn contains(&self, repository: Repository) -> bool {
        self.entries.contains_key(&repository)
    }
}
