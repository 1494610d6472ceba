// ─── Pipeline ───
// version index -> version JSON -> server jar + mappings -> library list.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::core::config::{ResolverPaths, ResolverSettings};
use crate::core::downloader::{DownloadRequest, Downloader, HttpTransport, Transport};
use crate::core::error::ResolverResult;
use crate::core::hashing::HashAlgorithm;
use crate::core::libraries::LibraryListCache;
use crate::core::maven::{repository_for, AdditionalDependencies, MavenRepository};
use crate::core::version::{VersionJson, VersionManifest};

/// Everything a build needs to compile against one server version.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInputs {
    pub minecraft_version: String,
    /// Release target for the Java toolchain.
    pub java_major_version: u32,
    pub server_jar: PathBuf,
    pub server_mappings: PathBuf,
    pub server_sha256: String,
    /// Server runtime libraries, in `libraries.list` order.
    pub libraries: Vec<String>,
    pub compile_only: Vec<String>,
    pub implementation: Vec<String>,
    pub repositories: Vec<MavenRepository>,
    /// Coordinates none of `repositories` is allowed to serve.
    pub without_repository: Vec<String>,
}

pub struct ServerInputsResolver {
    settings: ResolverSettings,
    paths: ResolverPaths,
    transport: Arc<dyn Transport>,
    downloader: Downloader,
}

impl ServerInputsResolver {
    pub fn new(settings: ResolverSettings, transport: Arc<dyn Transport>) -> Self {
        let paths = settings.paths();
        let downloader = Downloader::new(transport.clone());
        Self {
            settings,
            paths,
            transport,
            downloader,
        }
    }

    /// Resolver talking to the real network.
    pub fn http(settings: ResolverSettings) -> ResolverResult<Self> {
        Ok(Self::new(settings, Arc::new(HttpTransport::new()?)))
    }

    pub fn paths(&self) -> &ResolverPaths {
        &self.paths
    }

    /// Run the whole pipeline. Any failing stage aborts it.
    pub async fn resolve(&self) -> ResolverResult<BuildInputs> {
        let version_id = &self.settings.minecraft_version;
        info!("Resolving server inputs for Minecraft {}", version_id);

        // 1. Version index
        let index = VersionManifest::load_or_fetch(
            &self.paths.index,
            &self.settings.index_url,
            self.transport.as_ref(),
        )
        .await?;

        // 2. Version entry
        let entry = index.find_version(version_id)?;

        // 3. Version JSON
        let version_json =
            VersionJson::load(entry, &self.paths.version_manifest, &self.downloader).await?;

        // 4. Server jar + mappings, concurrently
        self.download_server_files(&version_json).await?;

        // 5. Server jar digest
        let server_jar = self.paths.server_jar.clone();
        let server_sha256 =
            tokio::task::spawn_blocking(move || HashAlgorithm::Sha256.hash_file(&server_jar))
                .await??;

        // 6. Library list
        let cache = LibraryListCache::new(&self.paths.libraries_cache);
        let server_jar = self.paths.server_jar.clone();
        let hash = server_sha256.clone();
        let libraries =
            tokio::task::spawn_blocking(move || cache.resolve_with_hash(&server_jar, &hash))
                .await??;

        info!(
            "Minecraft {}: {} server libraries, Java {}",
            version_id,
            libraries.len(),
            version_json.required_java_major()
        );

        let extra = &self.settings.additional_dependencies;
        let without_repository =
            uncovered_coordinates(&self.settings.repositories, &libraries, extra);

        Ok(BuildInputs {
            minecraft_version: version_id.clone(),
            java_major_version: version_json.required_java_major(),
            server_jar: self.paths.server_jar.clone(),
            server_mappings: self.paths.server_mappings.clone(),
            server_sha256,
            libraries,
            compile_only: extra.compile_only_coordinates(),
            implementation: extra.implementation_coordinates(),
            repositories: self.settings.repositories.clone(),
            without_repository,
        })
    }

    async fn download_server_files(&self, version_json: &VersionJson) -> ResolverResult<()> {
        let downloads = &version_json.downloads;
        let version_id = self.settings.minecraft_version.clone();

        Downloader::ensure_all(vec![
            self.downloader.ensure_async(
                DownloadRequest::new(
                    &downloads.server.url,
                    &self.paths.server_jar,
                    downloads.server.expected_hash(),
                ),
                Some(Box::new(move || {
                    info!("Downloading server jar for {}", version_id)
                })),
            ),
            self.downloader.ensure_async(
                DownloadRequest::new(
                    &downloads.server_mappings.url,
                    &self.paths.server_mappings,
                    downloads.server_mappings.expected_hash(),
                ),
                Some(Box::new(|| info!("Downloading server mappings"))),
            ),
        ])
        .await
    }
}

/// Coordinates no repository's group filter admits.
fn uncovered_coordinates(
    repositories: &[MavenRepository],
    libraries: &[String],
    extra: &AdditionalDependencies,
) -> Vec<String> {
    let mut uncovered: Vec<String> = libraries
        .iter()
        .filter(|coordinate| repository_for(repositories, coordinate).is_none())
        .cloned()
        .collect();

    let artifacts = extra
        .compile_only
        .iter()
        .chain(extra.implementation.iter())
        .flatten();
    uncovered.extend(
        artifacts
            .filter(|artifact| !repositories.iter().any(|r| r.includes_artifact(artifact)))
            .map(ToString::to_string),
    );

    for coordinate in &uncovered {
        warn!("No configured repository serves {}", coordinate);
    }
    uncovered
}
