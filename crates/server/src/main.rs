//! HTTP server binary.
//!
//! Configuration comes from `FOOD_*` environment variables, log levels from
//! `RUST_LOG`.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,pipeline=debug")),
        )
        .init();

    info!("Starting macro-picks server");

    let config = ServerConfig::load()?;
    start_server(config).await
}
