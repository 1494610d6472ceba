// ─── Version File ───
// Parses the per-version Mojang JSON: server downloads and required Java.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::manifest::VersionEntry;
use crate::core::downloader::Downloader;
use crate::core::error::{ResolverError, ResolverResult};
use crate::core::hashing::Hash;

/// The parts of a Mojang version JSON this crate reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionJson {
    pub downloads: VersionDownloads,
    pub java_version: JavaVersionInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaVersionInfo {
    pub major_version: u32,
}

#[derive(Debug, Deserialize)]
pub struct VersionDownloads {
    pub server: DownloadArtifact,
    pub server_mappings: DownloadArtifact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArtifact {
    pub sha1: String,
    pub url: String,
}

impl DownloadArtifact {
    pub fn expected_hash(&self) -> Hash {
        Hash::sha1(&self.sha1)
    }
}

impl VersionJson {
    pub fn parse(raw: &str, source_name: &str) -> ResolverResult<Self> {
        serde_json::from_str(raw).map_err(|e| ResolverError::ManifestParse {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Download the version JSON for `entry` to `dest` (verified against the
    /// entry's SHA-1) and parse it.
    pub async fn load(
        entry: &VersionEntry,
        dest: &Path,
        downloader: &Downloader,
    ) -> ResolverResult<Self> {
        downloader
            .ensure(&entry.url, dest, &Hash::sha1(&entry.sha1))
            .await?;

        let raw = tokio::fs::read_to_string(dest)
            .await
            .map_err(|e| ResolverError::io(dest, e))?;
        let version = Self::parse(&raw, &entry.url)?;

        info!(
            "Version {} requires Java {}",
            entry.id, version.java_version.major_version
        );
        Ok(version)
    }

    pub fn required_java_major(&self) -> u32 {
        self.java_version.major_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::downloader::testing::FakeTransport;
    use crate::core::hashing::HashAlgorithm;
    use std::sync::Arc;

    const VERSION: &str = r#"{
        "id": "1.20.1",
        "mainClass": "net.minecraft.client.main.Main",
        "downloads": {
            "client": {"sha1": "c0", "size": 1, "url": "https://example.com/client.jar"},
            "server": {"sha1": "s0", "size": 2, "url": "https://example.com/server.jar"},
            "server_mappings": {"sha1": "m0", "size": 3, "url": "https://example.com/server.txt"}
        },
        "javaVersion": {"component": "java-runtime-gamma", "majorVersion": 17}
    }"#;

    #[test]
    fn reads_server_downloads_and_java() {
        let version = VersionJson::parse(VERSION, "test").unwrap();
        assert_eq!(version.downloads.server.url, "https://example.com/server.jar");
        assert_eq!(version.downloads.server.sha1, "s0");
        assert_eq!(version.downloads.server_mappings.url, "https://example.com/server.txt");
        assert_eq!(version.required_java_major(), 17);
    }

    #[test]
    fn missing_server_mappings_is_fatal() {
        let raw = r#"{
            "downloads": {"server": {"sha1": "s0", "url": "u"}},
            "javaVersion": {"majorVersion": 17}
        }"#;
        let err = VersionJson::parse(raw, "https://example.com/1.14.json").unwrap_err();
        match err {
            ResolverError::ManifestParse { source_name, reason } => {
                assert_eq!(source_name, "https://example.com/1.14.json");
                assert!(reason.contains("server_mappings"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn load_verifies_against_index_sha1() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://example.com/1.20.1.json";
        let downloader = Downloader::new(Arc::new(
            FakeTransport::new().with_body(url, VERSION.as_bytes()),
        ));

        let good = VersionEntry {
            id: "1.20.1".into(),
            url: url.into(),
            sha1: HashAlgorithm::Sha1.hash_bytes(VERSION.as_bytes()),
        };
        let version = VersionJson::load(&good, &dir.path().join("version.json"), &downloader)
            .await
            .unwrap();
        assert_eq!(version.required_java_major(), 17);

        let bad = VersionEntry {
            sha1: "abc123".into(),
            ..good
        };
        let err = VersionJson::load(&bad, &dir.path().join("other.json"), &downloader)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolverError::HashMismatch { .. }));
    }
}
