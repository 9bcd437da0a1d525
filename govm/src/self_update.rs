//! Replacing the running govm binary with the newest release.
//!
//! The newest release is the last tag in govm's own tag feed. The matching
//! platform binary is downloaded into a temporary directory, marked
//! executable and swapped in with `self-replace`.

use crate::catalog::RemoteCatalog;
use crate::download::ArchiveDownloader;
use crate::error::{GovmError, Result};
use crate::output::write_stderr_line;
use crate::platform::Platform;
use std::io::{self, Write};
use std::path::Path;

/// The version of this build.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What a self-update did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfUpdateOutcome {
    /// The running binary is already the newest release.
    AlreadyNewest(String),
    /// The binary was replaced by the named release.
    Updated(String),
}

/// Replaces the running executable with the file at `new_executable`.
///
/// # Errors
///
/// Returns the I/O error reported by `self-replace`.
pub fn replace_running_executable(new_executable: &Path) -> io::Result<()> {
    self_replace::self_replace(new_executable)
}

/// Downloads and installs new govm releases.
pub struct SelfUpdater<'a> {
    platform: &'a Platform,
    download_url: &'a str,
    downloader: &'a dyn ArchiveDownloader,
    replace: &'a dyn Fn(&Path) -> io::Result<()>,
}

impl<'a> SelfUpdater<'a> {
    /// Creates an updater fetching binaries from `download_url` and
    /// installing them with `replace`.
    #[must_use]
    pub fn new(
        platform: &'a Platform,
        download_url: &'a str,
        downloader: &'a dyn ArchiveDownloader,
        replace: &'a dyn Fn(&Path) -> io::Result<()>,
    ) -> Self {
        Self {
            platform,
            download_url,
            downloader,
            replace,
        }
    }

    /// URL of the govm binary for this platform.
    #[must_use]
    pub fn binary_url(&self) -> String {
        format!("{}{}", self.download_url, self.platform.self_binary_name())
    }

    /// Updates govm when `catalog` lists a newer release tag.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::MalformedCatalog`] when the tag feed does not
    /// parse and [`GovmError::SelfUpdate`] when no release is published or
    /// the binary cannot be fetched or installed.
    pub fn run(
        &self,
        catalog: &mut RemoteCatalog,
        status: &mut dyn Write,
    ) -> Result<SelfUpdateOutcome> {
        let latest = catalog
            .latest_self_release()?
            .ok_or_else(|| GovmError::SelfUpdate {
                reason: "no govm releases were found".to_owned(),
            })?;
        if latest == format!("v{CURRENT_VERSION}") {
            write_stderr_line(status, format!("govm {latest} is already the newest version"));
            return Ok(SelfUpdateOutcome::AlreadyNewest(latest));
        }

        write_stderr_line(status, format!("Downloading govm {latest}"));
        self.fetch_and_replace()?;
        write_stderr_line(status, format!("Updated govm to {latest}"));
        Ok(SelfUpdateOutcome::Updated(latest))
    }

    fn fetch_and_replace(&self) -> Result<()> {
        let url = self.binary_url();
        let scratch = tempfile::tempdir()?;
        let binary = scratch.path().join(self.platform.self_binary_name());

        self.downloader
            .download(&url, &binary)
            .map_err(|err| GovmError::SelfUpdate {
                reason: format!("could not download {url}: {err}"),
            })?;
        make_executable(&binary)?;

        log::info!("replacing the running executable with {}", binary.display());
        (self.replace)(&binary).map_err(|err| GovmError::SelfUpdate {
            reason: format!("could not replace the running executable: {err}"),
        })
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
