//! Host platform naming in Go's release vocabulary.
//!
//! Go archives are published as `go{version}.{os}-{arch}.tar.gz` (or `.zip`
//! on Windows) using Go's own names (`darwin`, `amd64`, `arm64`). This module
//! maps Rust's compile-time target identifiers onto those names.

use crate::error::{GovmError, Result};

/// An operating system and CPU architecture pair in Go's naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    os: &'static str,
    arch: &'static str,
}

impl Platform {
    /// Returns the platform govm was compiled for.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::UnsupportedPlatform`] when Go publishes no
    /// archive for the host.
    pub fn current() -> Result<Self> {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Maps Rust's OS and architecture names to Go's.
    ///
    /// # Errors
    ///
    /// Returns [`GovmError::UnsupportedPlatform`] for unknown names.
    ///
    /// # Examples
    ///
    /// ```
    /// use govm::platform::Platform;
    ///
    /// let platform = Platform::new("macos", "aarch64").expect("supported");
    /// assert_eq!(platform.archive_name("1.16.1"), "go1.16.1.darwin-arm64.tar.gz");
    /// ```
    pub fn new(os: &str, arch: &str) -> Result<Self> {
        let unsupported = || GovmError::UnsupportedPlatform {
            os: os.to_owned(),
            arch: arch.to_owned(),
        };
        let go_os = go_os(os).ok_or_else(unsupported)?;
        let go_arch = go_arch(arch).ok_or_else(unsupported)?;
        Ok(Self {
            os: go_os,
            arch: go_arch,
        })
    }

    /// Go's name for the operating system.
    #[must_use]
    pub fn os(&self) -> &'static str {
        self.os
    }

    /// Go's name for the CPU architecture.
    #[must_use]
    pub fn arch(&self) -> &'static str {
        self.arch
    }

    /// Returns `true` for Windows, where archives are zip files.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Archive extension for Go releases on this platform.
    #[must_use]
    pub fn archive_extension(&self) -> &'static str {
        if self.is_windows() { "zip" } else { "tar.gz" }
    }

    /// File name of the Go release archive for `version`.
    #[must_use]
    pub fn archive_name(&self, version: &str) -> String {
        format!(
            "go{version}.{}-{}.{}",
            self.os,
            self.arch,
            self.archive_extension()
        )
    }

    /// File name of the published govm binary for this platform.
    #[must_use]
    pub fn self_binary_name(&self) -> String {
        let suffix = if self.is_windows() { ".exe" } else { "" };
        format!("govm-{}-{}{suffix}", self.os, self.arch)
    }
}

fn go_os(os: &str) -> Option<&'static str> {
    Some(match os {
        "linux" => "linux",
        "macos" => "darwin",
        "windows" => "windows",
        "freebsd" => "freebsd",
        "netbsd" => "netbsd",
        "openbsd" => "openbsd",
        "solaris" => "solaris",
        "illumos" => "illumos",
        "aix" => "aix",
        "dragonfly" => "dragonfly",
        _ => return None,
    })
}

fn go_arch(arch: &str) -> Option<&'static str> {
    Some(match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "arm" => "armv6l",
        "loongarch64" => "loong64",
        "powerpc64" => "ppc64le",
        "riscv64" => "riscv64",
        "s390x" => "s390x",
        "mips64" => "mips64",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::linux_amd64("linux", "x86_64", "go1.16.1.linux-amd64.tar.gz")]
    #[case::mac_arm("macos", "aarch64", "go1.16.1.darwin-arm64.tar.gz")]
    #[case::linux_386("linux", "x86", "go1.16.1.linux-386.tar.gz")]
    #[case::raspberry_pi("linux", "arm", "go1.16.1.linux-armv6l.tar.gz")]
    #[case::windows_zip("windows", "x86_64", "go1.16.1.windows-amd64.zip")]
    fn builds_go_archive_names(#[case] os: &str, #[case] arch: &str, #[case] expected: &str) {
        let platform = Platform::new(os, arch).expect("supported platform");
        assert_eq!(platform.archive_name("1.16.1"), expected);
    }

    #[rstest]
    #[case("linux", "x86_64", "govm-linux-amd64")]
    #[case("macos", "aarch64", "govm-darwin-arm64")]
    #[case("windows", "x86_64", "govm-windows-amd64.exe")]
    fn builds_self_binary_names(#[case] os: &str, #[case] arch: &str, #[case] expected: &str) {
        let platform = Platform::new(os, arch).expect("supported platform");
        assert_eq!(platform.self_binary_name(), expected);
    }

    #[rstest]
    #[case::unknown_os("haiku", "x86_64")]
    #[case::unknown_arch("linux", "sparc")]
    fn rejects_unsupported_platforms(#[case] os: &str, #[case] arch: &str) {
        let err = Platform::new(os, arch).expect_err("platform should be rejected");
        assert!(matches!(err, GovmError::UnsupportedPlatform { .. }));
    }
}
