// ─── Configuration ───
// Resolver settings and the on-disk layout of everything it caches.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{ResolverError, ResolverResult};
use crate::core::maven::{default_repositories, AdditionalDependencies, MavenRepository};
use crate::core::version::VERSION_MANIFEST_URL;

const APP_DIR_NAME: &str = "server-inputs";

pub const MC_MANIFEST: &str = "mc_manifest.json";
pub const MC_VERSION: &str = "version.json";
pub const DOWNLOAD_SERVER_JAR: &str = "server.jar";
pub const SERVER_MAPPINGS: &str = "server_mappings.txt";
pub const SERVER_LIBRARIES_LIST: &str = "server_libraries.json";

/// Settings read from the JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    pub minecraft_version: String,
    /// Where the index, manifests and artifacts are kept.
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
    #[serde(default = "default_index_url")]
    pub index_url: String,
    #[serde(default = "default_repositories")]
    pub repositories: Vec<MavenRepository>,
    #[serde(default)]
    pub additional_dependencies: AdditionalDependencies,
}

fn default_index_url() -> String {
    VERSION_MANIFEST_URL.to_string()
}

impl ResolverSettings {
    pub fn new(minecraft_version: impl Into<String>) -> Self {
        Self {
            minecraft_version: minecraft_version.into(),
            work_dir: None,
            index_url: default_index_url(),
            repositories: default_repositories(),
            additional_dependencies: AdditionalDependencies::default(),
        }
    }

    pub fn load(path: &Path) -> ResolverResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ResolverError::io(path, e))?;
        let settings: Self = serde_json::from_str(&raw)
            .map_err(|e| ResolverError::Config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ResolverResult<()> {
        if self.minecraft_version.trim().is_empty() {
            return Err(ResolverError::Config(
                "minecraft_version must not be empty".to_string(),
            ));
        }
        if let Some(repo) = self.repositories.iter().find(|r| r.url.trim().is_empty()) {
            return Err(ResolverError::Config(format!(
                "repository {} has no url",
                repo.name
            )));
        }
        Ok(())
    }

    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(default_work_dir)
    }

    pub fn paths(&self) -> ResolverPaths {
        ResolverPaths::new(&self.work_dir(), &self.minecraft_version)
    }
}

/// Concrete file locations for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPaths {
    /// Shared across versions.
    pub index: PathBuf,
    pub version_manifest: PathBuf,
    pub server_jar: PathBuf,
    pub server_mappings: PathBuf,
    pub libraries_cache: PathBuf,
}

impl ResolverPaths {
    pub fn new(work_dir: &Path, minecraft_version: &str) -> Self {
        let version_dir = work_dir.join(minecraft_version);
        Self {
            index: work_dir.join(MC_MANIFEST),
            version_manifest: version_dir.join(MC_VERSION),
            server_jar: version_dir.join(DOWNLOAD_SERVER_JAR),
            server_mappings: version_dir.join(SERVER_MAPPINGS),
            libraries_cache: version_dir.join(SERVER_LIBRARIES_LIST),
        }
    }
}

fn default_work_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let settings: ResolverSettings =
            serde_json::from_str(r#"{"minecraft_version": "1.20.1"}"#).unwrap();
        assert_eq!(settings.index_url, VERSION_MANIFEST_URL);
        assert_eq!(settings.repositories, default_repositories());
        assert!(settings.additional_dependencies.compile_only.is_none());
        assert!(settings.work_dir().ends_with(APP_DIR_NAME));
    }

    #[test]
    fn paths_are_laid_out_per_version() {
        let paths = ResolverPaths::new(Path::new("/work"), "1.20.1");
        assert_eq!(paths.index, PathBuf::from("/work/mc_manifest.json"));
        assert_eq!(paths.server_jar, PathBuf::from("/work/1.20.1/server.jar"));
        assert_eq!(
            paths.libraries_cache,
            PathBuf::from("/work/1.20.1/server_libraries.json")
        );
    }

    #[test]
    fn load_reads_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.json");
        std::fs::write(
            &path,
            r#"{
                "minecraft_version": "1.20.1",
                "work_dir": "/tmp/inputs",
                "repositories": [
                    {"name": "paper", "url": "https://repo.papermc.io/repository/maven-public/",
                     "groups": ["io.papermc"]}
                ],
                "additional_dependencies": {
                    "compileOnly": [{"group": "org.jetbrains", "name": "annotations", "version": "24.0.1"}]
                }
            }"#,
        )
        .unwrap();

        let settings = ResolverSettings::load(&path).unwrap();
        assert_eq!(settings.work_dir(), PathBuf::from("/tmp/inputs"));
        assert_eq!(settings.repositories.len(), 1);
        assert_eq!(
            settings.additional_dependencies.compile_only_coordinates(),
            vec!["org.jetbrains:annotations:24.0.1"]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.json");

        std::fs::write(&path, r#"{"minecraft_version": "  "}"#).unwrap();
        assert!(matches!(ResolverSettings::load(&path), Err(ResolverError::Config(_))));

        std::fs::write(&path, r#"{"work_dir": "/tmp"}"#).unwrap();
        assert!(matches!(ResolverSettings::load(&path), Err(ResolverError::Config(_))));
    }
}
