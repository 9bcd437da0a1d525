//! Shared test utilities for the govm crate.

use crate::store::LocalStore;
use camino::Utf8PathBuf;
use std::io::{self, Write};
use tempfile::TempDir;

/// A [`LocalStore`] rooted in a temporary directory that lives as long as
/// this value.
pub struct TempStore {
    _temp: TempDir,
    /// The store under test.
    pub store: LocalStore,
}

impl TempStore {
    /// Creates an empty store in a fresh temporary directory.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().join("govm")).expect("UTF-8 temp dir");
        Self {
            _temp: temp,
            store: LocalStore::new(root),
        }
    }

    /// Lays out `versions/<version>/go/bin/go` as an install would.
    pub fn fake_install(&self, version: &str) {
        let bin = self.store.version_goroot(version).join("bin");
        std::fs::create_dir_all(&bin).expect("create version bin dir");
        std::fs::write(bin.join("go"), version).expect("write fake go binary");
    }
}

/// Writes a minimal `go/` tree as a `.tar.gz` archive at `path`.
pub fn write_go_archive(path: &std::path::Path, version: &str) {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let output = std::fs::File::create(path).expect("create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(output, Compression::fast()));
    for (name, contents) in [("go/VERSION", format!("go{version}")), ("go/bin/go", String::new())] {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        builder
            .append_data(&mut header, name, contents.as_bytes())
            .expect("append entry");
    }
    let encoder = builder.into_inner().expect("tar finish");
    encoder.finish().expect("gzip finish");
}

/// A writer that always fails, for exercising output error paths.
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("write failed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("flush failed"))
    }
}

/// Collects bytes written to an output buffer as UTF-8.
pub fn text(buffer: &[u8]) -> String {
    String::from_utf8(buffer.to_vec()).expect("output is UTF-8")
}
