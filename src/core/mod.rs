// ─── Server Inputs Core ───
// Resolves what a build needs to compile against a Minecraft server version.
//
// Architecture:
//   core/
//     hashing/     SHA-1 / SHA-256 digests and expected-hash checks
//     downloader/  Hash-verified downloads, concurrent fan-out + join
//     archive/     Line access to entries of the server jar
//     version/     Mojang version index + per-version JSON
//     libraries/   libraries.list parsing + content-hash keyed cache
//     maven/       Coordinates, repositories, additional dependencies
//     config/      Settings file + on-disk layout
//     pipeline/    Sequencing of all of the above

pub mod archive;
pub mod config;
pub mod downloader;
pub mod error;
pub mod hashing;
pub mod http;
pub mod libraries;
pub mod maven;
pub mod pipeline;
pub mod version;
