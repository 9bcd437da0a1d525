//! Archive extraction for Go release archives.
//!
//! Unpacks `.tar.gz` archives (and `.zip` on Windows) into a version
//! directory with path traversal protection to prevent zip-slip attacks.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io;
use std::path::{Component, Path};

/// Trait for extracting release archives, enabling test mocking.
///
/// # Examples
///
/// ```
/// use govm::extraction::ArchiveUnpacker;
///
/// let extractor = ArchiveUnpacker;
/// // Use extractor.extract(archive_path, dest_dir) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Returns the number of entries that were unpacked.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any entry
    /// attempts to escape the destination directory.
    /// Returns [`ExtractionError::EmptyArchive`] if no entries are found.
    /// Returns [`ExtractionError::Io`] or [`ExtractionError::Zip`] on
    /// read or write failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractionError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] io::Error),

    /// The zip container could not be read.
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive contains no entries.
    #[error("archive is empty")]
    EmptyArchive,

    /// The archive unpacked without producing a `go` directory.
    #[error("archive does not contain a go directory")]
    MissingGoRoot,
}

/// Default extractor: `flate2` + `tar` for `.tar.gz`, `zip` for `.zip`.
///
/// Validates each entry path before extraction to guard against
/// path traversal attacks (zip-slip).
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveUnpacker;

impl ArchiveExtractor for ArchiveUnpacker {
    fn extract(&self, archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractionError> {
        let is_zip = archive_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        let count = if is_zip {
            extract_zip(archive_path, dest_dir)?
        } else {
            extract_tar_gz(archive_path, dest_dir)?
        };

        if count == 0 {
            return Err(ExtractionError::EmptyArchive);
        }
        log::debug!("unpacked {count} entries into {}", dest_dir.display());
        Ok(count)
    }
}

fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractionError> {
    let file = File::open(archive_path)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let mut count = 0;

    for entry_result in archive.entries()? {
        let mut entry = entry_result?;
        let entry_path = entry.path()?.into_owned();

        validate_entry_path(&entry_path)?;

        let dest_path = dest_dir.join(&entry_path);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        entry.unpack(&dest_path)?;
        count += 1;
    }

    Ok(count)
}

fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractionError> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path)?)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ExtractionError::PathTraversal {
                path: entry.name().to_owned(),
            })?;
        validate_entry_path(&relative)?;

        let dest_path = dest_dir.join(&relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&dest_path)?;
            continue;
        }
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&dest_path)?;
        io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dest_path, std::fs::Permissions::from_mode(mode & 0o777))?;
        }
    }

    Ok(archive.len())
}

/// Validate that an entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|component| matches!(component, Component::ParentDir | Component::Prefix(_)));
    if escapes {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "extraction_tests.rs"]
mod tests;
