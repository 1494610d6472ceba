use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::try_join_all;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::transport::{HttpTransport, Transport};
use crate::core::error::{ResolverError, ResolverResult};
use crate::core::hashing::Hash;

/// Observational callback fired when a transfer actually starts.
pub type OnStart = Box<dyn FnOnce() + Send + 'static>;

/// A single file to fetch, with the digest it must have.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub dest: PathBuf,
    pub expected: Hash,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, dest: impl Into<PathBuf>, expected: Hash) -> Self {
        Self {
            url: url.into(),
            dest: dest.into(),
            expected,
        }
    }
}

/// Hash-verified downloader.
///
/// A destination that already holds the expected digest is never fetched
/// again. Fetched bodies land in a `.part` sibling and are renamed into place
/// only once their digest matches.
#[derive(Clone)]
pub struct Downloader {
    transport: Arc<dyn Transport>,
}

impl Downloader {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Downloader backed by a fresh `reqwest` client.
    pub fn http() -> ResolverResult<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new()?)))
    }

    // ── Single file ─────────────────────────────────────

    /// Make sure `dest` holds content matching `expected`, downloading from
    /// `url` when it does not.
    pub async fn ensure(&self, url: &str, dest: &Path, expected: &Hash) -> ResolverResult<()> {
        self.ensure_with(url, dest, expected, None).await
    }

    async fn ensure_with(
        &self,
        url: &str,
        dest: &Path,
        expected: &Hash,
        on_start: Option<OnStart>,
    ) -> ResolverResult<()> {
        if is_current(dest, expected).await? {
            debug!("Up to date: {:?} ({})", dest, expected);
            return Ok(());
        }

        // A stale destination must not survive a failed transfer.
        remove_stale(dest).await?;

        if let Some(notify) = on_start {
            notify();
        }
        self.transfer(url, dest, expected).await
    }

    async fn transfer(&self, url: &str, dest: &Path, expected: &Hash) -> ResolverResult<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ResolverError::io(parent, e))?;
        }

        let partial = PartialFile::for_dest(dest);
        let mut body = self.transport.fetch(url).await?;
        let mut hasher = expected.algorithm.hasher();
        let mut received: u64 = 0;

        // Scoped so the handle is closed before the rename.
        {
            let mut file = tokio::fs::File::create(&partial.path)
                .await
                .map_err(|e| ResolverError::io(&partial.path, e))?;

            while let Some(chunk) = body.next().await {
                let chunk = chunk?;
                hasher.update(&chunk);
                file.write_all(&chunk)
                    .await
                    .map_err(|e| ResolverError::io(&partial.path, e))?;
                received += chunk.len() as u64;
            }

            file.flush()
                .await
                .map_err(|e| ResolverError::io(&partial.path, e))?;
        }

        let actual = hasher.finalize_hex();
        if !expected.matches(&actual) {
            return Err(ResolverError::HashMismatch {
                url: url.to_string(),
                algorithm: expected.algorithm.name(),
                expected: expected.hex_digest.clone(),
                actual,
            });
        }

        partial.commit(dest).await?;
        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, received);
        Ok(())
    }

    // ── Concurrent downloads ────────────────────────────

    /// Start `request` on its own task.
    ///
    /// Dropping the returned handle before it resolves cancels the transfer.
    pub fn ensure_async(&self, request: DownloadRequest, on_start: Option<OnStart>) -> DownloadHandle {
        let downloader = self.clone();
        let url = request.url.clone();
        let task = tokio::spawn(async move {
            downloader
                .ensure_with(&request.url, &request.dest, &request.expected, on_start)
                .await
        });
        DownloadHandle { url, task }
    }

    /// Wait for every handle. The first failure is returned and the remaining
    /// transfers are cancelled.
    pub async fn ensure_all(handles: Vec<DownloadHandle>) -> ResolverResult<()> {
        let urls: Vec<String> = handles.iter().map(|h| h.url().to_string()).collect();
        try_join_all(handles).await?;
        info!("Verified {} downloads: {}", urls.len(), urls.join(", "));
        Ok(())
    }
}

/// Handle to a download running on its own task.
pub struct DownloadHandle {
    url: String,
    task: JoinHandle<ResolverResult<()>>,
}

impl DownloadHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Future for DownloadHandle {
    type Output = ResolverResult<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.task).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(join_error)) => Poll::Ready(Err(ResolverError::Task(join_error))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for DownloadHandle {
    fn drop(&mut self) {
        // No-op once the task has finished.
        self.task.abort();
    }
}

/// `true` when `dest` exists and already has the expected digest.
async fn is_current(dest: &Path, expected: &Hash) -> ResolverResult<bool> {
    if !tokio::fs::try_exists(dest)
        .await
        .map_err(|e| ResolverError::io(dest, e))?
    {
        return Ok(false);
    }

    let dest = dest.to_path_buf();
    let expected = expected.clone();
    tokio::task::spawn_blocking(move || expected.verify(&dest)).await?
}

async fn remove_stale(dest: &Path) -> ResolverResult<()> {
    match tokio::fs::remove_file(dest).await {
        Ok(()) => {
            debug!("Removed stale {:?}", dest);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ResolverError::io(dest, e)),
    }
}

/// In-progress download target, removed unless committed.
struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    fn for_dest(dest: &Path) -> Self {
        let mut name = dest
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        Self {
            path: dest.with_file_name(name),
            committed: false,
        }
    }

    async fn commit(mut self, dest: &Path) -> ResolverResult<()> {
        tokio::fs::rename(&self.path, dest)
            .await
            .map_err(|e| ResolverError::io(dest, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
