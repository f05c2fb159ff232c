//! `hexsphere` binary entry point.
//!
//! Startup sequence:
//! 1. Parse arguments and load the optional JSON configuration.
//! 2. Initialise logging on stderr.
//! 3. Print the banner, health check and the selected sample runs.

use anyhow::{Context, Result};
use clap::Parser;
use hexsphere_core::EngineConfig;
use hexsphere_engine::{demo, telemetry, Args};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    telemetry::init(&config.logging)?;
    match &args.config {
        Some(path) => info!(path = %path.display(), "loaded engine configuration"),
        None => info!("using default engine configuration"),
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    demo::run(args.mode, &config, &mut out)
}
