//! User-supplied version tokens.
//!
//! A token is what the user types after `install` or `use`: an exact
//! release (`1.16.1`, `1.17rc1`), a major.minor prefix (`1.16`, `1.16.x`,
//! `1.16x`), a prefix pinned to its newest release (`1.16@latest`,
//! `1.16@dev-latest`) or one of the keywords `latest` and `dev-latest`.
//! Tokens are parsed into [`VersionToken`] before any lookup happens, so
//! ambiguous combinations such as `1.16.x@latest` are rejected up front.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const LATEST: &str = "latest";
const DEV_LATEST: &str = "dev-latest";
const LATEST_SUFFIX: &str = "@latest";
const DEV_LATEST_SUFFIX: &str = "@dev-latest";

/// A parsed version token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionToken {
    /// A concrete release, used as-is.
    Exact(String),
    /// A major.minor prefix resolving to its newest final release.
    MajorMinor(String),
    /// `X.Y@latest`: newest final release of the group.
    MajorMinorLatest(String),
    /// `X.Y@dev-latest`: newest release of the group, pre-releases included.
    MajorMinorDevLatest(String),
    /// `latest`: newest final release overall.
    Latest,
    /// `dev-latest`: newest release overall, pre-releases included.
    DevLatest,
}

/// Errors raised while parsing a version token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token was empty or whitespace.
    #[error("version must not be empty")]
    Empty,

    /// The token combines suffixes or has nothing before its suffix.
    #[error("invalid version \"{token}\": {reason}")]
    Invalid {
        /// The rejected token.
        token: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl VersionToken {
    /// Returns the group prefix this token selects, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::MajorMinor(prefix)
            | Self::MajorMinorLatest(prefix)
            | Self::MajorMinorDevLatest(prefix) => Some(prefix),
            Self::Exact(_) | Self::Latest | Self::DevLatest => None,
        }
    }

    /// Returns `true` when resolution may settle on a pre-release.
    #[must_use]
    pub fn accepts_pre_release(&self) -> bool {
        matches!(self, Self::MajorMinorDevLatest(_) | Self::DevLatest)
    }

    /// Returns `true` when the token can only be answered from the catalog.
    #[must_use]
    pub fn is_symbolic(&self) -> bool {
        !matches!(self, Self::Exact(_) | Self::MajorMinor(_))
    }
}

impl FromStr for VersionToken {
    type Err = TokenError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim();
        match token {
            "" => return Err(TokenError::Empty),
            LATEST => return Ok(Self::Latest),
            DEV_LATEST => return Ok(Self::DevLatest),
            _ => {}
        }

        if let Some(prefix) = token.strip_suffix(DEV_LATEST_SUFFIX) {
            return checked_prefix(token, prefix).map(Self::MajorMinorDevLatest);
        }
        if let Some(prefix) = token.strip_suffix(LATEST_SUFFIX) {
            return checked_prefix(token, prefix).map(Self::MajorMinorLatest);
        }
        if let Some(prefix) = token
            .strip_suffix(".x")
            .or_else(|| token.strip_suffix('x'))
        {
            return checked_prefix(token, prefix).map(Self::MajorMinor);
        }
        if token.contains('@') {
            return Err(invalid(token, "unknown suffix after '@'"));
        }

        check_version_name(token)?;
        if is_major_minor(token) {
            Ok(Self::MajorMinor(token.to_owned()))
        } else {
            Ok(Self::Exact(token.to_owned()))
        }
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(version) | Self::MajorMinor(version) => f.write_str(version),
            Self::MajorMinorLatest(prefix) => write!(f, "{prefix}{LATEST_SUFFIX}"),
            Self::MajorMinorDevLatest(prefix) => write!(f, "{prefix}{DEV_LATEST_SUFFIX}"),
            Self::Latest => f.write_str(LATEST),
            Self::DevLatest => f.write_str(DEV_LATEST),
        }
    }
}

fn checked_prefix(token: &str, prefix: &str) -> Result<String, TokenError> {
    if prefix.is_empty() {
        return Err(invalid(token, "missing version before suffix"));
    }
    if prefix.contains('@') || prefix.ends_with('x') {
        return Err(invalid(token, "only one of .x, @latest or @dev-latest may be used"));
    }
    check_version_name(prefix).map_err(|_| invalid(token, NOT_A_NAME))?;
    Ok(prefix.to_owned())
}

const NOT_A_NAME: &str = "a version must be a single name without path separators";

/// Checks that `name` can be used as a directory under `versions/`.
///
/// A version is one plain path component: not empty, free of `/` and `\`,
/// and not starting with a dot (which also rules out `.` and `..`).
///
/// # Errors
///
/// Returns [`TokenError::Empty`] for an empty name and
/// [`TokenError::Invalid`] for anything else that is not a plain component.
///
/// # Examples
///
/// ```
/// use govm::token::check_version_name;
///
/// assert!(check_version_name("1.16.1").is_ok());
/// assert!(check_version_name("../current").is_err());
/// assert!(check_version_name("1.17/").is_err());
/// ```
pub fn check_version_name(name: &str) -> Result<(), TokenError> {
    if name.is_empty() {
        return Err(TokenError::Empty);
    }
    if name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(invalid(name, NOT_A_NAME));
    }
    Ok(())
}

fn invalid(token: &str, reason: &'static str) -> TokenError {
    TokenError::Invalid {
        token: token.to_owned(),
        reason,
    }
}

/// Two dot-separated numeric components and nothing else.
fn is_major_minor(token: &str) -> bool {
    let mut parts = token.split('.');
    let numeric = |part: Option<&str>| {
        part.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    };
    numeric(parts.next()) && numeric(parts.next()) && parts.next().is_none()
}

/// Collapses a trailing `.0` patch on a three-component version.
///
/// Go publishes `X.Y.0` as `X.Y`, so `1.16.0` is rewritten to `1.16` before
/// it reaches the resolver.
///
/// # Examples
///
/// ```
/// use govm::token::normalize_version_arg;
///
/// assert_eq!(normalize_version_arg("1.16.0"), "1.16");
/// assert_eq!(normalize_version_arg("1.16.1"), "1.16.1");
/// assert_eq!(normalize_version_arg("latest"), "latest");
/// ```
#[must_use]
pub fn normalize_version_arg(arg: &str) -> String {
    let parts: Vec<&str> = arg.split('.').collect();
    match parts.as_slice() {
        [major, minor, "0"] => format!("{major}.{minor}"),
        _ => arg.to_owned(),
    }
}
