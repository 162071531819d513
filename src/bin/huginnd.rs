//! huginnd: Huginn daemon.
//!
//! Serves a [`PromptResolver`](huginn::PromptResolver) over HTTP so every
//! client shares one cache and one backend connection pool.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use huginn::server::config::{CacheKind, Config};

/// Huginn daemon: cached prompt resolution service.
#[derive(Parser)]
#[command(name = "huginnd")]
#[command(version = huginn::PKG_VERSION)]
#[command(about = "Huginn prompt cache daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let resolver = config.resolver_builder()?.build()?;

    let cache = match config.cache.kind {
        CacheKind::Redis => "redis",
        CacheKind::Memory => "memory",
        CacheKind::None => "disabled",
    };
    info!(
        version = huginn::version_string(),
        backend = %config.backend.base_url,
        cache,
        ttl_secs = config.cache.ttl_secs,
        "huginnd starting"
    );

    huginn::server::serve(&config, Arc::new(resolver)).await?;

    Ok(())
}
