//! Service binary for trawl.

use clap::Parser;
use std::path::PathBuf;
use trawl::TrawlConfig;
use tracing_subscriber::EnvFilter;

/// trawl: fan-out search across several providers.
#[derive(Parser)]
#[command(name = "trawl", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, env = "TRAWL_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind (overrides the config file).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding index.html and front-end assets.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see per-source counts.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("trawl=info,trawl_search=info,tower_http=warn")
        }))
        .init();

    let cli = Cli::parse();

    let mut config = TrawlConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(dir) = cli.static_dir {
        config.server.static_dir = dir;
    }

    trawl::server::serve(&config).await.map_err(|e| {
        tracing::error!(error = %e, "trawl exited with error");
        anyhow::anyhow!("trawl failed: {e}")
    })
}
