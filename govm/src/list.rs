//! List command implementations.
//!
//! `list` reports what is unpacked in the local store; `ls-remote` reports
//! what the release catalog offers. Both write to stdout, human-readable by
//! default and JSON with `--json`.

use std::io::Write;

use crate::catalog::VersionCatalog;
use crate::error::{GovmError, Result};
use crate::list_output::{
    format_installed_human, format_installed_json, format_remote_human, format_remote_json,
};
use crate::store::LocalStore;
use crate::version::{compare, is_pre_release};

/// Installed versions in display order, plus the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledVersions {
    versions: Vec<String>,
    current: Option<String>,
}

impl InstalledVersions {
    /// Wraps an already ordered list.
    #[must_use]
    pub fn new(versions: Vec<String>, current: Option<String>) -> Self {
        Self { versions, current }
    }

    /// Reads the store and orders its versions for display: final releases
    /// by version, then pre-releases by name.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::Io`] when `versions/` cannot be read.
    pub fn from_store(store: &LocalStore) -> Result<Self> {
        let names = store.installed_versions()?;
        let (mut finals, pre_releases): (Vec<String>, Vec<String>) =
            names.into_iter().partition(|name| !is_pre_release(name));
        finals.sort_by(|a, b| compare(a, b));
        finals.extend(pre_releases);
        Ok(Self::new(finals, store.current_version()))
    }

    /// Versions in display order.
    #[must_use]
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// The active version, if the links point at one.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Returns `true` when nothing is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Lists installed versions.
///
/// # Errors
///
/// Returns [`GovmError::Io`] when the store cannot be read and
/// [`GovmError::WriteFailed`] when writing to `stdout` fails.
pub fn run_list(store: &LocalStore, json: bool, stdout: &mut dyn Write) -> Result<()> {
    let installed = InstalledVersions::from_store(store)?;
    log::debug!("found {} installed versions", installed.versions().len());

    let output = if json {
        format_installed_json(&installed)
    } else {
        format_installed_human(&installed)
    };
    writeln!(stdout, "{output}").map_err(|source| GovmError::WriteFailed { source })
}

/// Lists the releases offered by `catalog`, grouped by major.minor.
///
/// # Errors
///
/// Returns [`GovmError::MalformedCatalog`] when release metadata cannot be
/// parsed and [`GovmError::WriteFailed`] when writing to `stdout` fails.
pub fn run_ls_remote(
    catalog: &mut dyn VersionCatalog,
    json: bool,
    stdout: &mut dyn Write,
) -> Result<()> {
    let grouped = catalog.grouped_versions()?;

    let output = if json {
        format_remote_json(&grouped)
    } else {
        format_remote_human(&grouped)
    };
    writeln!(stdout, "{output}").map_err(|source| GovmError::WriteFailed { source })
}
