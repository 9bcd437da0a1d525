//! Run configuration.
//!
//! [`Settings`] is resolved once at start-up from, in order of precedence,
//! the `--root` flag, the `GOVM_HOME` and `GOVM_REGISTRY` environment
//! variables, an optional `config.toml` in the install root, and built-in
//! defaults.

use crate::dirs::BaseDirs;
use crate::error::{GovmError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Name of the install root under the home directory.
pub const DEFAULT_ROOT_DIR: &str = ".govm";
/// Environment variable overriding the install root.
pub const HOME_ENV: &str = "GOVM_HOME";
/// Environment variable overriding the archive registry.
pub const REGISTRY_ENV: &str = "GOVM_REGISTRY";
/// File name of the optional configuration file in the install root.
pub const CONFIG_FILE: &str = "config.toml";

/// Where Go release archives are downloaded from.
pub const DEFAULT_REGISTRY: &str = "https://golang.org/dl/";
/// Feed of Go toolchain release tags.
pub const DEFAULT_TAGS_URL: &str =
    "https://raw.githubusercontent.com/TaceyWong/govm/go-tags/tags.json";
/// Feed of govm's own release tags.
pub const DEFAULT_SELF_TAGS_URL: &str = "https://api.github.com/repos/TaceyWong/govm/git/refs/tags";
/// Where govm's own release binaries are downloaded from.
pub const DEFAULT_SELF_DOWNLOAD_URL: &str =
    "https://github.com/TaceyWong/govm/releases/latest/download/";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Install root holding `versions/`, `current/` and `downloads/`.
    pub root: Utf8PathBuf,
    /// Base URL for Go release archives, ending in `/`.
    pub registry: String,
    /// URL of the Go toolchain tag feed.
    pub tags_url: String,
    /// URL of govm's own tag feed.
    pub self_tags_url: String,
    /// Base URL for govm release binaries, ending in `/`.
    pub self_download_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    registry: Option<String>,
    tags_url: Option<String>,
    self_tags_url: Option<String>,
    self_download_url: Option<String>,
}

impl Settings {
    /// Resolves settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Settings::load_with`].
    pub fn load(root_flag: Option<&Utf8Path>, dirs: &dyn BaseDirs) -> Result<Self> {
        Self::load_with(root_flag, dirs, |key| std::env::var(key).ok())
    }

    /// Resolves settings using `env` to look up environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::HomeDirectory`] when no root is given and no home
    /// directory is known, [`GovmError::NonUtf8Path`] for a non-UTF-8 home
    /// and [`GovmError::InvalidConfig`] when `config.toml` cannot be read or
    /// parsed.
    pub fn load_with<F>(root_flag: Option<&Utf8Path>, dirs: &dyn BaseDirs, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = match (root_flag, non_blank(env(HOME_ENV))) {
            (Some(flag), _) => flag.to_path_buf(),
            (None, Some(home)) => Utf8PathBuf::from(home),
            (None, None) => default_root(dirs)?,
        };
        let file = read_config_file(&root.join(CONFIG_FILE))?;
        log::debug!("install root is {root}");

        let registry = non_blank(env(REGISTRY_ENV))
            .or_else(|| non_blank(file.registry))
            .unwrap_or_else(|| DEFAULT_REGISTRY.to_owned());
        let self_download_url =
            non_blank(file.self_download_url).unwrap_or_else(|| DEFAULT_SELF_DOWNLOAD_URL.to_owned());

        Ok(Self {
            root,
            registry: with_trailing_slash(registry),
            tags_url: non_blank(file.tags_url).unwrap_or_else(|| DEFAULT_TAGS_URL.to_owned()),
            self_tags_url: non_blank(file.self_tags_url)
                .unwrap_or_else(|| DEFAULT_SELF_TAGS_URL.to_owned()),
            self_download_url: with_trailing_slash(self_download_url),
        })
    }
}

fn default_root(dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    let home = dirs.home_dir().ok_or(GovmError::HomeDirectory)?;
    let home = Utf8PathBuf::from_path_buf(home)
        .map_err(|path| GovmError::NonUtf8Path(path.display().to_string()))?;
    Ok(home.join(DEFAULT_ROOT_DIR))
}

fn read_config_file(path: &Utf8Path) -> Result<FileConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(err) => {
            return Err(GovmError::InvalidConfig {
                path: path.to_path_buf(),
                reason: err.to_string(),
            });
        }
    };
    toml::from_str(&contents).map_err(|err| GovmError::InvalidConfig {
        path: path.to_path_buf(),
        reason: err.message().to_owned(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
