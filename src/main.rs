//! # Prism
//!
//! A search aggregator that fans a query out to a video platform, three social
//! platforms and three news outlets, and answers with one categorized JSON
//! bundle.
//!
//! ## Usage
//!
//! ```sh
//! prism --port 3030 --public-dir ./public
//! curl 'http://localhost:3030/api/search?query=election&location=Ohio'
//! ```
//!
//! ## Architecture
//!
//! Each request runs the same pipeline:
//! 1. **Validate**: a blank query is rejected before anything is fetched
//! 2. **Fan out**: YouTube and each news outlet are fetched concurrently; the
//!    templated social sources are built inline
//! 3. **Extract**: outlet pages go through the ordered selector catalog,
//!    link/thumbnail normalization and per-source dedup
//! 4. **Fall back**: an outlet with nothing usable gets deterministic
//!    placeholder entries
//! 5. **Respond**: every source key is present in the JSON bundle

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod catalog;
mod cli;
mod client;
mod config;
mod dedup;
mod enrich;
mod error;
mod extract;
mod fallback;
mod models;
mod scrapers;
mod server;
mod utils;

use aggregate::Aggregator;
use cli::Cli;
use client::HttpFetcher;
use config::AppConfig;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("prism starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let app_config = match &args.config {
        Some(path) => AppConfig::load(path).await?,
        None => AppConfig::default(),
    };
    let mut client_config = app_config.client_config();
    if args.enrich_thumbnails {
        client_config.enrich_thumbnails = true;
    }
    info!(
        video_timeout = ?client_config.video_timeout,
        news_timeout = ?client_config.news_timeout,
        enrich_thumbnails = client_config.enrich_thumbnails,
        "Client configured"
    );

    // ---- Aggregator & router ----
    let fetcher = HttpFetcher::new(&client_config)?;
    let aggregator = Arc::new(Aggregator::new(Arc::new(fetcher), client_config));
    let app = server::router(aggregator, args.public_dir.as_deref());

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "Prism server listening");
    if let Some(dir) = &args.public_dir {
        info!(public_dir = %dir.display(), "Serving static files");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
