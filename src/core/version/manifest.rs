// ─── Version Manifest ───
// The top-level Mojang version index and version lookup.

use std::path::Path;

use futures_util::StreamExt;
use serde::Deserialize;
use tracing::info;

use crate::core::downloader::Transport;
use crate::core::error::{ResolverError, ResolverResult};

pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Top-level Mojang version manifest.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<VersionEntry>,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    pub url: String,
    pub sha1: String,
}

impl VersionManifest {
    pub fn parse(raw: &str, source_name: &str) -> ResolverResult<Self> {
        serde_json::from_str(raw).map_err(|e| ResolverError::ManifestParse {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read the local copy of the index at `path`.
    pub async fn load(path: &Path) -> ResolverResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ResolverError::io(path, e))?;
        let manifest = Self::parse(&raw, &path.display().to_string())?;
        info!("Loaded {} versions from {:?}", manifest.versions.len(), path);
        Ok(manifest)
    }

    /// Read the index at `path`, fetching it from `url` first when no local
    /// copy exists yet.
    pub async fn load_or_fetch(
        path: &Path,
        url: &str,
        transport: &dyn Transport,
    ) -> ResolverResult<Self> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| ResolverError::io(path, e))?;
        if !exists {
            Self::refresh(path, url, transport).await?;
        }
        Self::load(path).await
    }

    /// Fetch the index from `url` and store it at `path`.
    pub async fn refresh(path: &Path, url: &str, transport: &dyn Transport) -> ResolverResult<()> {
        info!("Fetching Minecraft version manifest from {}", url);

        let mut body = transport.fetch(url).await?;
        let mut raw = Vec::new();
        while let Some(chunk) = body.next().await {
            raw.extend_from_slice(&chunk?);
        }

        // Reject garbage before it replaces a usable local copy.
        let text = String::from_utf8(raw).map_err(|e| ResolverError::ManifestParse {
            source_name: url.to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&text, url)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ResolverError::io(parent, e))?;
        }
        tokio::fs::write(path, text)
            .await
            .map_err(|e| ResolverError::io(path, e))?;
        Ok(())
    }

    /// Find a specific version entry by exact ID (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> ResolverResult<&VersionEntry> {
        self.versions
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| ResolverError::UnknownVersion(id.to_string()))
    }
}
