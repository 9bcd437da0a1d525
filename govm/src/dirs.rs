//! Directory resolution abstraction for platform-specific paths.
//!
//! Only the home directory matters to govm: the default install root is
//! `~/.govm`. Hiding the lookup behind [`BaseDirs`] lets configuration tests
//! supply a temporary home.

use std::path::PathBuf;

/// Source of per-user base directories, mocked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait BaseDirs {
    /// The user's home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// [`BaseDirs`] backed by the operating system via `directories-next`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}
