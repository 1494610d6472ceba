pub mod manifest;
pub mod version_file;

pub use manifest::{VersionEntry, VersionManifest, VERSION_MANIFEST_URL};
pub use version_file::{DownloadArtifact, JavaVersionInfo, VersionDownloads, VersionJson};
