pub mod cli;
pub mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use crate::core::error::{ResolverError, ResolverResult};
pub use crate::core::pipeline::{BuildInputs, ServerInputsResolver};

/// Entry point of the `server-inputs` binary.
pub fn run() -> ResolverResult<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server_inputs=debug")),
        )
        .init();

    let args = cli::Args::parse();
    let settings = args.settings()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let inputs = runtime.block_on(async {
        ServerInputsResolver::http(settings)?.resolve().await
    })?;

    print!("{}", cli::render(&inputs, args.json)?);
    Ok(())
}
