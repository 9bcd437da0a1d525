//! On-disk layout of the install root.
//!
//! ```text
//! <root>/
//!   versions/<V>/go/...   unpacked releases
//!   current/bin  -> versions/<V>/go/bin
//!   current/go   -> versions/<V>/go
//!   downloads/            scratch space for archives
//! ```
//!
//! The two `current` links are the only record of which version is active.

use crate::error::{GovmError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

const VERSIONS_DIR: &str = "versions";
const CURRENT_DIR: &str = "current";
const DOWNLOADS_DIR: &str = "downloads";
const GO_DIR: &str = "go";
const BIN_DIR: &str = "bin";

/// The install root and the paths derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStore {
    root: Utf8PathBuf,
}

impl LocalStore {
    /// Creates a store rooted at `root`. Nothing is created on disk.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The install root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Directory holding one subdirectory per installed version.
    #[must_use]
    pub fn versions_dir(&self) -> Utf8PathBuf {
        self.root.join(VERSIONS_DIR)
    }

    /// Directory holding the `bin` and `go` links.
    #[must_use]
    pub fn current_dir(&self) -> Utf8PathBuf {
        self.root.join(CURRENT_DIR)
    }

    /// Link to the active version's `go/bin`; this goes on `PATH`.
    #[must_use]
    pub fn current_bin(&self) -> Utf8PathBuf {
        self.current_dir().join(BIN_DIR)
    }

    /// Link to the active version's `go`; this is `GOROOT`.
    #[must_use]
    pub fn current_go(&self) -> Utf8PathBuf {
        self.current_dir().join(GO_DIR)
    }

    /// Scratch directory for downloaded archives.
    #[must_use]
    pub fn downloads_dir(&self) -> Utf8PathBuf {
        self.root.join(DOWNLOADS_DIR)
    }

    /// Directory a version is unpacked into.
    #[must_use]
    pub fn version_dir(&self, version: &str) -> Utf8PathBuf {
        self.versions_dir().join(version)
    }

    /// `GOROOT` of an installed version.
    #[must_use]
    pub fn version_goroot(&self, version: &str) -> Utf8PathBuf {
        self.version_dir(version).join(GO_DIR)
    }

    /// Returns `true` when `version` has been unpacked.
    #[must_use]
    pub fn exists(&self, version: &str) -> bool {
        self.version_goroot(version).is_dir()
    }

    /// Creates the root, `current`, `versions`, the version's own directory
    /// and `downloads`. Existing directories are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::Io`] when a directory cannot be created.
    pub fn ensure_dirs(&self, version: &str) -> Result<()> {
        for dir in [
            self.current_dir(),
            self.version_dir(version),
            self.downloads_dir(),
        ] {
            fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Points both `current` links at `version`.
    ///
    /// Each link is replaced by renaming a freshly created staging link over
    /// it, so a reader sees either the old or the new target.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::Symlink`] naming the link that could not be
    /// replaced. If the second link fails the first has already moved.
    pub fn relink(&self, version: &str) -> Result<()> {
        let goroot = self.version_goroot(version);
        fs::create_dir_all(self.current_dir())?;
        swap_link(&self.current_bin(), &goroot.join(BIN_DIR))?;
        swap_link(&self.current_go(), &goroot)?;
        log::debug!("current links now point at {goroot}");
        Ok(())
    }

    /// The version `current/bin` points at, if it points into `versions/`.
    #[must_use]
    pub fn current_version(&self) -> Option<String> {
        let target = self.current_bin().canonicalize_utf8().ok()?;
        let versions = self.versions_dir().canonicalize_utf8().ok()?;
        let rest = target.strip_prefix(&versions).ok()?;
        let mut components = rest.components();
        let version = components.next()?.as_str().to_owned();
        let expected = Utf8Path::new(GO_DIR).join(BIN_DIR);
        (components.as_path() == expected.as_path()).then_some(version)
    }

    /// Names of installed versions, in file-name order.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::Io`] when `versions/` exists but cannot be read.
    pub fn installed_versions(&self) -> Result<Vec<String>> {
        let entries = match self.versions_dir().read_dir_utf8() {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.path().join(GO_DIR).is_dir() {
                versions.push(entry.file_name().to_owned());
            }
        }
        versions.sort();
        Ok(versions)
    }

    /// Deletes a version directory and everything under it.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::Io`] when removal fails.
    pub fn remove_version(&self, version: &str) -> Result<()> {
        remove_dir_if_present(&self.version_dir(version))
    }

    /// Deletes the scratch download directory.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::Io`] when removal fails.
    pub fn clean_downloads(&self) -> Result<()> {
        remove_dir_if_present(&self.downloads_dir())
    }
}

fn remove_dir_if_present(dir: &Utf8Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
        _ => Ok(()),
    }
}

fn swap_link(link: &Utf8Path, target: &Utf8Path) -> Result<()> {
    let symlink_error = |source: io::Error| GovmError::Symlink {
        link: link.to_path_buf(),
        source,
    };
    let staging = staging_path(link);
    remove_any(&staging).map_err(symlink_error)?;
    symlink_dir(target, &staging).map_err(symlink_error)?;

    // A plain directory here predates the links; rename cannot replace it.
    if fs::symlink_metadata(link).is_ok_and(|meta| meta.file_type().is_dir()) {
        fs::remove_dir_all(link).map_err(symlink_error)?;
    }
    #[cfg(windows)]
    remove_any(link).map_err(symlink_error)?;

    fs::rename(&staging, link).map_err(symlink_error)
}

fn staging_path(link: &Utf8Path) -> Utf8PathBuf {
    let name = link.file_name().unwrap_or("link");
    link.with_file_name(format!(".{name}.next"))
}

/// Removes a file, link or directory at `path`; absence is not an error.
fn remove_any(path: &Utf8Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    if meta.file_type().is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path).or_else(|_| fs::remove_dir(path))
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
