use std::fmt::Write;
use std::path::PathBuf;

use clap::Parser;

use crate::core::config::ResolverSettings;
use crate::core::error::{ResolverError, ResolverResult};
use crate::core::pipeline::BuildInputs;

/// Resolve the server jar, mappings and library list for a Minecraft version.
#[derive(Debug, Parser)]
#[command(name = "server-inputs", version, about)]
pub struct Args {
    /// JSON settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minecraft version id, e.g. 1.20.1 (overrides the settings file)
    #[arg(short = 'm', long)]
    pub minecraft_version: Option<String>,

    /// Directory for the index, manifests and artifacts
    #[arg(short, long)]
    pub work_dir: Option<PathBuf>,

    /// Version index URL
    #[arg(long)]
    pub index_url: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Settings file (if any) with command-line overrides applied.
    pub fn settings(&self) -> ResolverResult<ResolverSettings> {
        let mut settings = match (&self.config, &self.minecraft_version) {
            (Some(path), _) => ResolverSettings::load(path)?,
            (None, Some(version)) => ResolverSettings::new(version),
            (None, None) => {
                return Err(ResolverError::Config(
                    "pass --config or --minecraft-version".to_string(),
                ))
            }
        };

        if let Some(version) = &self.minecraft_version {
            settings.minecraft_version = version.clone();
        }
        if let Some(dir) = &self.work_dir {
            settings.work_dir = Some(dir.clone());
        }
        if let Some(url) = &self.index_url {
            settings.index_url = url.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Output for the dependency sink: `<configuration> <coordinate>` per line,
/// or the whole result as JSON.
pub fn render(inputs: &BuildInputs, json: bool) -> ResolverResult<String> {
    if json {
        let mut out = serde_json::to_string_pretty(inputs)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    let _ = writeln!(out, "java {}", inputs.java_major_version);
    for (configuration, coordinates) in [
        ("minecraft", &inputs.libraries),
        ("compileOnly", &inputs.compile_only),
        ("implementation", &inputs.implementation),
    ] {
        for coordinate in coordinates {
            let _ = writeln!(out, "{} {}", configuration, coordinate);
        }
    }
    Ok(out)
}
