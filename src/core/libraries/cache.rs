// ─── Library List Cache ───
// Server library coordinates, cached under the SHA-256 of the server jar.
//
// The cached list is only trusted while its `sha256` equals the digest of the
// jar on disk. Any other state (missing, unreadable, stale) regenerates it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::list::read_server_libraries;
use crate::core::error::{ResolverError, ResolverResult};
use crate::core::hashing::HashAlgorithm;

static NEXT_TMP_ID: AtomicU64 = AtomicU64::new(0);

/// On-disk cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrariesList {
    pub sha256: String,
    pub libraries: Vec<String>,
}

pub struct LibraryListCache {
    cache_path: PathBuf,
}

impl LibraryListCache {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Library coordinates of `server_jar`, from the cache when it is still
    /// valid for the jar's current content.
    pub fn resolve(&self, server_jar: &Path) -> ResolverResult<Vec<String>> {
        let server_hash = HashAlgorithm::Sha256.hash_file(server_jar)?;
        self.resolve_with_hash(server_jar, &server_hash)
    }

    /// Same as [`resolve`](Self::resolve) with the jar's SHA-256 already known.
    pub fn resolve_with_hash(
        &self,
        server_jar: &Path,
        server_hash: &str,
    ) -> ResolverResult<Vec<String>> {
        if let Some(cached) = self.read_cached() {
            if cached.sha256.eq_ignore_ascii_case(server_hash) {
                debug!(
                    "Library list cache hit for {:?} ({} libraries)",
                    server_jar,
                    cached.libraries.len()
                );
                return Ok(cached.libraries);
            }
            info!(
                "Server jar changed ({} -> {}), rebuilding library list",
                cached.sha256, server_hash
            );
        }

        let libraries = read_server_libraries(server_jar)?;
        self.store(&LibrariesList {
            sha256: server_hash.to_string(),
            libraries: libraries.clone(),
        })?;

        info!("Cached {} server libraries", libraries.len());
        Ok(libraries)
    }

    /// The current cache entry, or `None` when there is no usable one.
    pub fn read_cached(&self) -> Option<LibrariesList> {
        let raw = match std::fs::read_to_string(&self.cache_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read library cache {:?}: {}", self.cache_path, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Corrupt library cache {:?}: {}", self.cache_path, e);
                None
            }
        }
    }

    /// Replace the cache file. Written to a sibling and renamed, so readers
    /// never see a torn file and the last writer wins.
    fn store(&self, entry: &LibrariesList) -> ResolverResult<()> {
        let json = serde_json::to_string(entry)?;

        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ResolverError::io(parent, e))?;
        }

        let mut tmp_name = self
            .cache_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(format!(
            ".{}-{}.tmp",
            std::process::id(),
            NEXT_TMP_ID.fetch_add(1, Ordering::Relaxed)
        ));
        let tmp_path = self.cache_path.with_file_name(tmp_name);

        std::fs::write(&tmp_path, json).map_err(|e| ResolverError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &self.cache_path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            ResolverError::io(&self.cache_path, e)
        })
    }
}
