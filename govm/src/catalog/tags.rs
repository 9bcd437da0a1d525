//! Tag feeds for the Go toolchain and for govm itself.
//!
//! Both feeds are JSON arrays of git references in the shape GitHub's refs
//! API returns (`[{"ref": "refs/tags/go1.16.1"}, ...]`). The HTTP client is
//! configured not to treat error statuses as failures: a rate-limited
//! response is still a body, and that body failing to parse is what callers
//! report.

use super::CatalogError;
use crate::download::{DownloadError, map_ureq_error};
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

const TAG_PREFIX: &str = "refs/tags/";
const METADATA_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "govm";

/// Which repository a tag list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repository {
    /// Go toolchain release tags (`go1.16.1`).
    Toolchain,
    /// govm's own release tags (`v0.1.0`).
    SelfRelease,
}

/// Source of raw tag documents, mocked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait TagSource {
    /// Fetches the raw JSON tag document for `repository`.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] when the request cannot be completed or
    /// its body cannot be read.
    fn fetch(&self, repository: Repository) -> Result<String, DownloadError>;
}

/// Fetches tag documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTagSource {
    toolchain_url: String,
    self_url: String,
}

impl HttpTagSource {
    /// Creates a source reading toolchain tags from `toolchain_url` and
    /// govm's own tags from `self_url`.
    #[must_use]
    pub fn new(toolchain_url: impl Into<String>, self_url: impl Into<String>) -> Self {
        Self {
            toolchain_url: toolchain_url.into(),
            self_url: self_url.into(),
        }
    }

    /// Endpoint serving tags for `repository`.
    #[must_use]
    pub fn url(&self, repository: Repository) -> &str {
        match repository {
            Repository::Toolchain => &self.toolchain_url,
            Repository::SelfRelease => &self.self_url,
        }
    }
}

impl TagSource for HttpTagSource {
    fn fetch(&self, repository: Repository) -> Result<String, DownloadError> {
        let url = self.url(repository);
        log::debug!("fetching {repository:?} tags from {url}");
        let response = metadata_agent()
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        log::trace!("tag feed answered with status {}", response.status());
        response
            .into_body()
            .read_to_string()
            .map_err(|e| DownloadError::HttpError {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Agent for small metadata documents that keeps non-2xx bodies.
fn metadata_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(METADATA_TIMEOUT))
            .http_status_as_error(false)
            .build();
        ureq::Agent::new_with_config(config)
    })
}

#[derive(Debug, Deserialize)]
struct TagRef {
    #[serde(rename = "ref", alias = "Ref")]
    reference: String,
}

/// Parses a tag document into tag names.
///
/// The `refs/tags/` prefix is removed and only tags starting with `v` or
/// `go` are kept, in document order.
///
/// # Errors
///
/// Returns [`CatalogError::Malformed`] when `body` is not an array of
/// reference objects.
///
/// # Examples
///
/// ```
/// use govm::catalog::parse_tag_refs;
///
/// let body = r#"[{"ref": "refs/tags/go1.16"}, {"ref": "refs/tags/weekly.2011-01-01"}]"#;
/// assert_eq!(parse_tag_refs(body).expect("valid document"), ["go1.16"]);
/// ```
pub fn parse_tag_refs(body: &str) -> Result<Vec<String>, CatalogError> {
    let refs: Vec<TagRef> =
        serde_json::from_str(body).map_err(|source| CatalogError::Malformed { source })?;
    Ok(refs
        .into_iter()
        .map(|tag| {
            tag.reference
                .strip_prefix(TAG_PREFIX)
                .map_or_else(|| tag.reference.clone(), str::to_owned)
        })
        .filter(|tag| tag.starts_with('v') || tag.starts_with("go"))
        .collect())
}
