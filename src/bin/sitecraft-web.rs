//! Sitecraft Web Server Binary
//!
//! This binary starts the Sitecraft web server that provides a REST API
//! for the website builder's design panel.
//!
//! # Usage
//!
//! ```bash
//! # Start with configured settings (port 3002, themes in ~/.config/Sitecraft/data/)
//! sitecraft-web
//!
//! # Specify port and theme store directory
//! sitecraft-web --port 8080 --data-dir ~/my-themes
//!
//! # Throwaway session, nothing written to disk
//! sitecraft-web --memory
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitecraft::config::Config;
use sitecraft::services::{FileStore, KeyValueStore, MemoryStore};
use sitecraft::web;

/// Sitecraft Web Server - REST API for the design panel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (defaults to the configured port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    host: Option<String>,

    /// Theme store directory.
    /// Defaults to the configured data directory, or the platform config dir:
    /// - Linux: ~/.config/Sitecraft/data/
    /// - macOS: ~/Library/Application Support/Sitecraft/data/
    /// - Windows: %APPDATA%\Sitecraft\data\
    #[arg(short, long, conflicts_with = "memory")]
    data_dir: Option<PathBuf>,

    /// Keep themes in memory only
    #[arg(long)]
    memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load or create configuration
    let config = Config::load().unwrap_or_default();

    let store: Arc<dyn KeyValueStore> = if args.memory {
        info!("Theme store: in memory");
        Arc::new(MemoryStore::new())
    } else {
        let data_dir = match args.data_dir {
            Some(path) => path,
            None => config.data_dir()?,
        };
        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;
        info!("Theme store: {}", data_dir.display());
        Arc::new(FileStore::new(data_dir))
    };

    // Build socket address
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Start the server
    web::run_server(config, store, addr).await
}
