//! Error types for the govm CLI.
//!
//! Leaf modules report narrow errors (`DownloadError`, `ExtractionError`,
//! `TokenError`, `CatalogError`); this module wraps them with the context a
//! user needs (version, URL, path) and recovery hints where one exists. Only
//! the binary decides to terminate the process, using
//! [`GovmError::exit_code`].

use crate::catalog::CatalogError;
use crate::download::DownloadError;
use crate::extraction::ExtractionError;
use crate::token::TokenError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Exit code for general failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code signalling that remote release metadata could not be parsed,
/// which in practice means the endpoint is rate limiting us.
pub const EXIT_MALFORMED_CATALOG: i32 = 2;

/// Errors that can occur while managing Go versions.
#[derive(Debug, Error)]
pub enum GovmError {
    /// A subcommand that needs a version was invoked without one.
    #[error("no version provided")]
    MissingVersion,

    /// The version token could not be parsed.
    #[error(transparent)]
    InvalidVersion(#[from] TokenError),

    /// The remote tag document was not the expected JSON.
    #[error("remote version metadata is malformed (rate limit exceeded?): {source}")]
    MalformedCatalog {
        /// The underlying parse failure.
        #[source]
        source: CatalogError,
    },

    /// No release in the catalog satisfies a symbolic version token.
    #[error("no release matches {token}; run `govm ls-remote` to see available versions")]
    NoMatchingRelease {
        /// The token as typed by the user.
        token: String,
    },

    /// The requested version is not installed.
    #[error("version {version} is not installed; run: govm install {version}")]
    NotInstalled {
        /// The missing version.
        version: String,
    },

    /// Refused to remove the version the current links point at.
    #[error(
        "version {version} is your current version; use a different version before uninstalling it"
    )]
    UninstallCurrent {
        /// The active version.
        version: String,
    },

    /// Downloading the release archive failed.
    #[error("failed to download version {version}; check connectivity to {url}: {source}")]
    Download {
        /// The version being installed.
        version: String,
        /// The archive URL.
        url: String,
        /// The underlying download failure.
        #[source]
        source: DownloadError,
    },

    /// Unpacking the release archive failed.
    #[error("failed to extract version {version}; check that it exists at {url}: {source}")]
    Extraction {
        /// The version being installed.
        version: String,
        /// The archive URL.
        url: String,
        /// The underlying extraction failure.
        #[source]
        source: ExtractionError,
    },

    /// Creating or replacing one of the current-version links failed.
    #[error("symbolic link {link} could not be updated: {source}")]
    Symlink {
        /// The link being replaced.
        link: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The host OS or architecture has no published Go archive.
    #[error("unsupported platform {os}/{arch}")]
    UnsupportedPlatform {
        /// Rust's name for the operating system.
        os: String,
        /// Rust's name for the CPU architecture.
        arch: String,
    },

    /// The user's home directory could not be determined.
    #[error("could not determine home directory; set GOVM_HOME or pass --root")]
    HomeDirectory,

    /// A path was not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// `config.toml` exists but could not be read or parsed.
    #[error("invalid configuration file {path}: {reason}")]
    InvalidConfig {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Replacing the govm binary failed.
    #[error("self-update failed: {reason}")]
    SelfUpdate {
        /// Description of the failure.
        reason: String,
    },

    /// Failed to write listing output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GovmError {
    /// Returns the process exit code for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use govm::error::{EXIT_FAILURE, GovmError};
    ///
    /// assert_eq!(GovmError::MissingVersion.exit_code(), EXIT_FAILURE);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedCatalog { .. } => EXIT_MALFORMED_CATALOG,
            _ => EXIT_FAILURE,
        }
    }
}

impl From<CatalogError> for GovmError {
    fn from(source: CatalogError) -> Self {
        Self::MalformedCatalog { source }
    }
}

/// Result type alias using [`GovmError`].
pub type Result<T> = std::result::Result<T, GovmError>;
