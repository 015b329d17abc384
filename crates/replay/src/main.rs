//! Drive Assist Replay - Main Entry Point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use replay::{init_logging, load_config, run_replay};

/// Replay recorded frames from stdin, writing actions to stdout
#[derive(Parser, Debug)]
#[command(name = "drive-assist-replay", version, about)]
struct Cli {
    /// Configuration file (TOML, JSON, or YAML)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Drive Assist Replay v{} ===", env!("CARGO_PKG_VERSION"));

    let stdin = BufReader::new(tokio::io::stdin());
    let stats = run_replay(config, stdin, tokio::io::stdout()).await?;

    info!("Processed {} frames into {} actions", stats.frames, stats.actions);
    Ok(())
}
