//! Installing Go releases into the local store.
//!
//! An install resolves the token, downloads the platform archive into
//! `downloads/`, unpacks it into `versions/<V>/` and clears the scratch
//! directory. A failed download or extraction removes the half-created
//! version directory so a retry starts clean.

use crate::catalog::VersionCatalog;
use crate::download::ArchiveDownloader;
use crate::error::{GovmError, Result};
use crate::extraction::{ArchiveExtractor, ExtractionError};
use crate::output::write_stderr_line;
use crate::platform::Platform;
use crate::resolver::resolve;
use crate::store::LocalStore;
use crate::token::check_version_name;
use std::io::Write;

/// What an install did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The version was already unpacked; nothing changed.
    AlreadyInstalled(String),
    /// The version was downloaded and unpacked.
    Installed(String),
}

impl InstallOutcome {
    /// The concrete version the token resolved to.
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::AlreadyInstalled(version) | Self::Installed(version) => version,
        }
    }
}

/// Installs releases using injected download and extraction strategies.
pub struct Installer<'a> {
    store: &'a LocalStore,
    platform: &'a Platform,
    registry: &'a str,
    downloader: &'a dyn ArchiveDownloader,
    extractor: &'a dyn ArchiveExtractor,
}

impl<'a> Installer<'a> {
    /// Creates an installer that fetches archives from `registry`.
    #[must_use]
    pub fn new(
        store: &'a LocalStore,
        platform: &'a Platform,
        registry: &'a str,
        downloader: &'a dyn ArchiveDownloader,
        extractor: &'a dyn ArchiveExtractor,
    ) -> Self {
        Self {
            store,
            platform,
            registry,
            downloader,
            extractor,
        }
    }

    /// URL of the archive for `version` on this platform.
    #[must_use]
    pub fn archive_url(&self, version: &str) -> String {
        format!("{}{}", self.registry, self.platform.archive_name(version))
    }

    /// Resolves `token` and installs the release it names.
    ///
    /// Installing a version that is already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns resolution errors from [`resolve`], [`GovmError::Download`]
    /// or [`GovmError::Extraction`] when fetching or unpacking fails, and
    /// [`GovmError::Io`] when the store directories cannot be created.
    pub fn install(
        &self,
        token: &str,
        catalog: &mut dyn VersionCatalog,
        status: &mut dyn Write,
    ) -> Result<InstallOutcome> {
        let version = resolve(token, catalog)?;
        self.install_version(&version, status)
    }

    /// Installs an already resolved `version`.
    ///
    /// # Errors
    ///
    /// See [`Installer::install`].
    pub fn install_version(&self, version: &str, status: &mut dyn Write) -> Result<InstallOutcome> {
        check_version_name(version)?;
        self.store.ensure_dirs(version)?;
        if self.store.exists(version) {
            write_stderr_line(status, format!("Version {version} is already installed"));
            return Ok(InstallOutcome::AlreadyInstalled(version.to_owned()));
        }

        write_stderr_line(status, format!("Downloading version: {version}"));
        if let Err(err) = self.fetch_and_unpack(version) {
            self.discard(version);
            return Err(err);
        }
        if let Err(err) = self.store.clean_downloads() {
            log::warn!("could not clear download directory: {err}");
        }

        write_stderr_line(status, format!("Installed version: {version}"));
        Ok(InstallOutcome::Installed(version.to_owned()))
    }

    fn fetch_and_unpack(&self, version: &str) -> Result<()> {
        let url = self.archive_url(version);
        let archive = self
            .store
            .downloads_dir()
            .join(self.platform.archive_name(version));
        let version_dir = self.store.version_dir(version);

        log::info!("downloading {url} to {archive}");
        self.downloader
            .download(&url, archive.as_std_path())
            .map_err(|source| GovmError::Download {
                version: version.to_owned(),
                url: url.clone(),
                source,
            })?;

        log::info!("extracting {archive} to {version_dir}");
        let extraction_error = |source: ExtractionError| GovmError::Extraction {
            version: version.to_owned(),
            url: url.clone(),
            source,
        };
        self.extractor
            .extract(archive.as_std_path(), version_dir.as_std_path())
            .map_err(extraction_error)?;
        if !self.store.exists(version) {
            return Err(extraction_error(ExtractionError::MissingGoRoot));
        }
        Ok(())
    }

    fn discard(&self, version: &str) {
        log::debug!("removing partial install of {version}");
        if let Err(err) = self.store.remove_version(version) {
            log::warn!("could not remove {}: {err}", self.store.version_dir(version));
        }
        if let Err(err) = self.store.clean_downloads() {
            log::warn!("could not clear download directory: {err}");
        }
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
