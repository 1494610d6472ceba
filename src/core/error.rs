use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the resolver.
/// Every module returns `Result<T, ResolverError>`.
#[derive(Debug, Error)]
pub enum ResolverError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── Integrity ───────────────────────────────────────
    #[error("{algorithm} mismatch for {url}: expected {expected}, got {actual}")]
    HashMismatch {
        url: String,
        algorithm: &'static str,
        expected: String,
        actual: String,
    },

    // ── Manifest ────────────────────────────────────────
    #[error("Unknown Minecraft version {0}")]
    UnknownVersion(String),

    #[error("Failed to parse manifest {source_name}: {reason}")]
    ManifestParse { source_name: String, reason: String },

    // ── Server jar ──────────────────────────────────────
    #[error("Invalid libraries.list in {path:?} at line {line_number}: {line:?}")]
    MalformedLibraryLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("Corrupt archive {path:?}: {reason}")]
    CorruptArchive { path: PathBuf, reason: String },

    #[error("Entry {entry} not found in archive {path:?}")]
    EntryNotFound { path: PathBuf, entry: String },

    // ── Metadata ────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Config ──────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),

    // ── Tasks ───────────────────────────────────────────
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Convenience alias used throughout the crate.
pub type ResolverResult<T> = Result<T, ResolverError>;

impl ResolverError {
    /// Wrap an IO error with the path it happened at, mapping a missing file
    /// to [`ResolverError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return ResolverError::FileNotFound(path);
        }
        ResolverError::Io { path, source }
    }
}

impl From<std::io::Error> for ResolverError {
    fn from(source: std::io::Error) -> Self {
        ResolverError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
