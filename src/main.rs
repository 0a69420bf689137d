//! Folio Web Server
//!
//! Run with: cargo run --bin folio
//!
//! # Configuration
//!
//! Settings are read from `--config`, or the first of
//! `~/.config/folio/config.toml`, `/etc/folio/config.toml` and
//! `./config.toml`, then overridden by environment variables:
//! - `FOLIO_HOST`, `FOLIO_PORT`: Address to bind to (default: 0.0.0.0:8080)
//! - `FOLIO_STORE_URL`, `FOLIO_STORE_KEY`: Content store endpoint and public key (required)
//! - `FOLIO_CATALOG`: `remote` or `static` (default: remote)
//! - `FOLIO_THEME_FILE`: Where the theme preference is kept
//! - `FOLIO_LOG_LEVEL`, `FOLIO_LOG_FORMAT`: Logging (default: info, pretty)

use anyhow::Context;
use clap::Parser;
use folio::config::Config;
use folio::content::ContentService;
use folio::gateway::{Gateway, RestGateway};
use folio::shell::{FileThemeStore, ThemeService};
use folio::web::{serve, AppState};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the academic portfolio site")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    folio::init_logging(&config.logging);
    tracing::info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .context("The content store must be configured before the site can start")?;

    let gateway = RestGateway::new(&config.store)?;
    tracing::info!("Content store: {}", config.store.url);

    match gateway.health_check().await {
        Ok(()) => tracing::info!("Content store reachable"),
        Err(e) => tracing::warn!("Content store not reachable yet: {}", e),
    }

    let theme = Arc::new(ThemeService::init(FileThemeStore::new(&config.theme.file)));
    tracing::info!("Theme preference file: {}", config.theme.file);
    tracing::info!("Catalog source: {:?}", config.content.catalog);

    let state = AppState::new(
        ContentService::new(Arc::new(gateway)),
        config.content.catalog,
        theme,
        config.site.clone(),
    );

    serve(state, &config.server).await?;

    tracing::info!("Folio stopped");
    Ok(())
}
