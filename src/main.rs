use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use youtube_sheets_mcp::{Config, Server};

/// MCP server that searches YouTube videos and appends the results to a
/// Google Sheet.
#[derive(Debug, Parser)]
#[command(name = "youtube-sheets-mcp", version, about)]
struct Cli {
    /// Path to the service-account credential file (defaults to
    /// credentials.json next to the executable)
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Log level filter (overridden by RUST_LOG when set)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Stdout belongs to the MCP transport; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(path) = cli.credentials {
        config = config.with_credentials_path(path);
    }

    info!("youtube-sheets-mcp {} starting", env!("CARGO_PKG_VERSION"));

    let server = Server::new(config);
    server.run().await.context("server exited with an error")?;

    Ok(())
}
