//! Test support utilities for govm behavioural tests.
//!
//! Every scenario runs the real binary against its own temporary install
//! root. Nothing here talks to the network: tag feeds can be pointed at a
//! closed local port to exercise the degraded path.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A tag feed URL nothing listens on.
pub const UNREACHABLE_FEED: &str = "http://127.0.0.1:9/tags.json";

/// A temporary `GOVM_HOME`.
pub struct GovmHome {
    _temp: TempDir,
    root: PathBuf,
}

impl GovmHome {
    /// Creates an empty install root.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = temp.path().join("govm");
        std::fs::create_dir_all(&root).expect("failed to create govm home");
        Self { _temp: temp, root }
    }

    /// The install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a version is unpacked into.
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.root.join("versions").join(version)
    }

    /// Lays out `versions/<version>/go/bin/go` as an install would.
    pub fn fake_install(&self, version: &str) {
        let bin = self.version_dir(version).join("go").join("bin");
        std::fs::create_dir_all(&bin).expect("failed to create version bin dir");
        std::fs::write(bin.join("go"), version).expect("failed to write fake go binary");
    }

    /// Writes `config.toml` in the install root.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.root.join("config.toml"), contents).expect("failed to write config");
    }

    /// Runs the govm binary with `args` against this root.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_govm"))
            .args(args)
            .env("GOVM_HOME", &self.root)
            .env_remove("GOVM_REGISTRY")
            .output()
            .expect("failed to run govm")
    }
}
