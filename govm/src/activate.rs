//! Switching the active Go version.

use crate::catalog::VersionCatalog;
use crate::error::{GovmError, Result};
use crate::output::write_stderr_line;
use crate::resolver::resolve;
use crate::store::LocalStore;
use std::io::Write;

/// What a switch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    /// The requested version was already active; the links were left alone.
    AlreadyCurrent(String),
    /// The links now point at `version`.
    Switched {
        /// The version active before the switch, if any.
        previous: Option<String>,
        /// The newly active version.
        version: String,
    },
}

impl UseOutcome {
    /// The version active after the call.
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::AlreadyCurrent(version) | Self::Switched { version, .. } => version,
        }
    }
}

/// Resolves `token` and points the `current` links at it.
///
/// # Errors
///
/// Returns resolution errors from [`resolve`], [`GovmError::NotInstalled`]
/// when the resolved version has not been installed, and
/// [`GovmError::Symlink`] when a link cannot be replaced.
pub fn use_version(
    token: &str,
    store: &LocalStore,
    catalog: &mut dyn VersionCatalog,
    status: &mut dyn Write,
) -> Result<UseOutcome> {
    let version = resolve(token, catalog)?;
    if !store.exists(&version) {
        return Err(GovmError::NotInstalled { version });
    }

    let previous = store.current_version();
    if previous.as_deref() == Some(version.as_str()) {
        write_stderr_line(
            status,
            format!("Version {version} is already your current version"),
        );
        return Ok(UseOutcome::AlreadyCurrent(version));
    }

    log::info!(
        "switching from {} to {version}",
        previous.as_deref().unwrap_or("no version")
    );
    store.relink(&version)?;
    write_stderr_line(status, format!("Changed go version to: {version}"));
    Ok(UseOutcome::Switched { previous, version })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GroupedVersions;
    use crate::test_utils::{TempStore, text};
    use rstest::{fixture, rstest};

    #[fixture]
    fn temp() -> TempStore {
        TempStore::new()
    }

    fn catalog() -> GroupedVersions {
        GroupedVersions::from_versions(["1.16", "1.16.1", "1.17", "1.18beta1"])
    }

    #[rstest]
    fn missing_version_is_not_installed(temp: TempStore) {
        let err = use_version("1.16.1", &temp.store, &mut catalog(), &mut Vec::new())
            .expect_err("nothing installed");

        assert!(matches!(err, GovmError::NotInstalled { version } if version == "1.16.1"));
        assert!(!temp.store.current_bin().exists());
    }

    #[rstest]
    fn empty_token_is_missing_version(temp: TempStore) {
        let err = use_version("", &temp.store, &mut catalog(), &mut Vec::new())
            .expect_err("empty token");
        assert!(matches!(err, GovmError::MissingVersion));
    }

    #[cfg(unix)]
    #[rstest]
    fn switches_links_to_installed_version(temp: TempStore) {
        temp.fake_install("1.16.1");
        let mut status = Vec::new();

        let outcome = use_version("1.16.1", &temp.store, &mut catalog(), &mut status)
            .expect("switch succeeds");

        assert_eq!(
            outcome,
            UseOutcome::Switched {
                previous: None,
                version: "1.16.1".to_owned()
            }
        );
        assert_eq!(temp.store.current_version().as_deref(), Some("1.16.1"));
        assert!(temp.store.current_go().join("bin/go").is_file());
        assert_eq!(text(&status), "Changed go version to: 1.16.1\n");
    }

    #[cfg(unix)]
    #[rstest]
    fn reports_previous_version_when_switching(temp: TempStore) {
        temp.fake_install("1.16.1");
        temp.fake_install("1.17");
        use_version("1.16.1", &temp.store, &mut catalog(), &mut Vec::new())
            .expect("first switch");

        let outcome = use_version("latest", &temp.store, &mut catalog(), &mut Vec::new())
            .expect("second switch");

        assert_eq!(
            outcome,
            UseOutcome::Switched {
                previous: Some("1.16.1".to_owned()),
                version: "1.17".to_owned()
            }
        );
        assert_eq!(temp.store.current_version().as_deref(), Some("1.17"));
    }

    #[cfg(unix)]
    #[rstest]
    fn using_current_version_is_a_no_op(temp: TempStore) {
        temp.fake_install("1.17");
        use_version("1.17", &temp.store, &mut catalog(), &mut Vec::new()).expect("first switch");
        let mut status = Vec::new();

        let outcome =
            use_version("1.17", &temp.store, &mut catalog(), &mut status).expect("no-op switch");

        assert_eq!(outcome, UseOutcome::AlreadyCurrent("1.17".to_owned()));
        assert!(text(&status).contains("already your current version"));
    }

    #[cfg(unix)]
    #[rstest]
    fn dev_latest_selects_pre_release(temp: TempStore) {
        temp.fake_install("1.18beta1");

        let outcome = use_version("dev-latest", &temp.store, &mut catalog(), &mut Vec::new())
            .expect("switch succeeds");

        assert_eq!(outcome.version(), "1.18beta1");
    }
}
