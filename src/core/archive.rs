// ─── Archive Reader ───
// Read-only access to entries of a zip-structured archive (the server jar).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::error::{ResolverError, ResolverResult};

/// An open archive. The underlying file is closed when this is dropped.
pub struct JarArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
}

impl JarArchive {
    pub fn open(path: &Path) -> ResolverResult<Self> {
        let file = File::open(path).map_err(|e| ResolverError::io(path, e))?;
        let zip = ZipArchive::new(file).map_err(|e| archive_error(path, e))?;
        debug!("Opened archive {:?} ({} entries)", path, zip.len());
        Ok(Self {
            path: path.to_path_buf(),
            zip,
        })
    }

    /// Lazily read `entry` as text lines. Single pass; borrow the archive
    /// again to re-read.
    pub fn read_lines<'a>(
        &'a mut self,
        entry: &str,
    ) -> ResolverResult<impl Iterator<Item = ResolverResult<String>> + 'a> {
        let path = self.path.clone();
        let file = self.zip.by_name(entry).map_err(|e| match e {
            ZipError::FileNotFound => ResolverError::EntryNotFound {
                path: path.clone(),
                entry: entry.to_string(),
            },
            other => archive_error(&path, other),
        })?;

        Ok(BufReader::new(file)
            .lines()
            .map(move |line| line.map_err(|e| ResolverError::io(&path, e))))
    }
}

/// Open `path`, hand the archive to `f`, and close it on every exit path.
pub fn with_archive<T>(
    path: &Path,
    f: impl FnOnce(&mut JarArchive) -> ResolverResult<T>,
) -> ResolverResult<T> {
    let mut archive = JarArchive::open(path)?;
    f(&mut archive)
}

/// Anything past opening the file is a structural problem with the archive.
fn archive_error(path: &Path, error: ZipError) -> ResolverError {
    ResolverError::CorruptArchive {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}
