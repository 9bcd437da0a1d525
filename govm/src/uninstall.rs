//! Removing installed versions.

use crate::error::{GovmError, Result};
use crate::output::write_stderr_line;
use crate::store::LocalStore;
use crate::token::check_version_name;
use std::io::Write;

/// Deletes `version` from the store.
///
/// The version is matched literally against the installed directory names;
/// symbolic tokens are not resolved.
///
/// # Errors
///
/// Returns [`GovmError::MissingVersion`] for an empty version,
/// [`GovmError::InvalidVersion`] when it is not a plain directory name,
/// [`GovmError::UninstallCurrent`] when the links point at it,
/// [`GovmError::NotInstalled`] when it is absent and [`GovmError::Io`]
/// when removal fails.
pub fn uninstall(version: &str, store: &LocalStore, status: &mut dyn Write) -> Result<()> {
    if version.is_empty() {
        return Err(GovmError::MissingVersion);
    }
    check_version_name(version)?;
    if store.current_version().as_deref() == Some(version) {
        return Err(GovmError::UninstallCurrent {
            version: version.to_owned(),
        });
    }
    if !store.exists(version) {
        return Err(GovmError::NotInstalled {
            version: version.to_owned(),
        });
    }

    log::info!("removing {}", store.version_dir(version));
    store.remove_version(version)?;
    write_stderr_line(status, format!("Uninstalled version: {version}"));
    Ok(())
}
