//! vitrine — marketing-site backend with admin dashboard.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                 SITE BACKEND                  │
//!                     │                                               │
//!   Client Request    │  ┌──────────┐   ┌───────────┐   ┌──────────┐ │
//!   ──────────────────┼─▶│  http    │──▶│ rate-limit│──▶│ handlers │ │
//!                     │  │  server  │   │   gate    │   │          │ │
//!                     │  └──────────┘   └───────────┘   └────┬─────┘ │
//!                     │                                      │       │
//!                     │        ┌──────────────┬──────────────┤       │
//!                     │        ▼              ▼              ▼       │
//!                     │  ┌──────────┐  ┌──────────┐  ┌──────────┐    │
//!                     │  │ pricing  │  │  stores  │  │ outbound │    │
//!                     │  │  engine  │  │ (leads,  │  │  sinks   │    │
//!                     │  │  (pure)  │  │ content) │  │          │    │
//!                     │  └──────────┘  └──────────┘  └──────────┘    │
//!                     │                                               │
//!                     │  Cross-cutting: config (hot reload),          │
//!                     │  observability, lifecycle, security           │
//!                     └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine::config::{load_config, ConfigWatcher, SiteConfig};
use vitrine::http::HttpServer;
use vitrine::lifecycle::Shutdown;
use vitrine::observability::metrics;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Marketing-site backend with admin dashboard", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when absent.
    #[arg(short, long, default_value = "vitrine.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vitrine starting");

    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        tracing::warn!(path = ?cli.config, "Config file not found, using defaults");
        SiteConfig::default()
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_window_secs = config.rate_limit.window_secs,
        rate_limit_max_requests = config.rate_limit.max_requests,
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    // Metrics endpoint
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Config hot reload. The watcher handle must stay alive for the
    // lifetime of the process.
    let mut watcher_handle = None;
    let config_updates = if cli.config.exists() {
        let (watcher, rx) = ConfigWatcher::new(&cli.config);
        watcher_handle = Some(watcher.run()?);
        rx
    } else {
        let (_tx, rx) = mpsc::unbounded_channel();
        rx
    };
    let _watcher_handle = watcher_handle;

    // Shutdown on Ctrl+C
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
