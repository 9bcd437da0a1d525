//! Archive downloads.
//!
//! Provides a trait-based abstraction over fetching release archives so the
//! install flow can be exercised without network access.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Time allowed to establish a connection. Transfers themselves are not
/// bounded since toolchain archives run to well over 100 MiB.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "govm";
const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})";

/// Trait for downloading archives, enabling test mocking.
///
/// # Examples
///
/// ```
/// use govm::download::HttpDownloader;
///
/// let downloader = HttpDownloader::new(false);
/// // Use downloader.download(url, dest) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveDownloader {
    /// Downloads `url` into the file `dest`, replacing it if present.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::NotFound`] for a 404,
    /// [`DownloadError::HttpError`] for other request failures and
    /// [`DownloadError::Io`] when the file cannot be written.
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;
}

/// Errors arising from download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// Nothing is published at the URL (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] io::Error),
}

/// HTTP downloader using `ureq`, with an optional progress bar on stderr.
#[derive(Debug, Clone, Copy)]
pub struct HttpDownloader {
    show_progress: bool,
}

impl HttpDownloader {
    /// Creates a downloader; `show_progress` enables the progress bar.
    #[must_use]
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }

    fn progress_bar(&self, length: Option<u64>) -> ProgressBar {
        match length {
            Some(len) if self.show_progress => {
                let bar = ProgressBar::new(len);
                let style = ProgressStyle::default_bar()
                    .template(PROGRESS_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                bar.set_style(style);
                bar
            }
            _ => ProgressBar::hidden(),
        }
    }
}

impl ArchiveDownloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        log::debug!("downloading {url} to {}", dest.display());
        let response = http_agent()
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut body = response.into_body();
        let bar = self.progress_bar(body.content_length());

        let mut file = BufWriter::new(std::fs::File::create(dest)?);
        let copied = io::copy(&mut bar.wrap_read(body.as_reader()), &mut file);
        bar.finish_and_clear();
        let bytes = copied.map_err(|e| DownloadError::HttpError {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        file.flush()?;
        log::debug!("downloaded {bytes} bytes from {url}");
        Ok(())
    }
}

/// Shared `ureq` agent for archive transfers.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
pub(crate) fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
