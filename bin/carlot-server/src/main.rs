//! carlot-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialise structured tracing (JSON or human-readable).
//! 3. Open the SQLite catalog and run pending migrations.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod error;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use carlot_catalog::{CatalogStore, SqliteCatalog};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&cfg);
    info!(version = env!("CARGO_PKG_VERSION"), "carlot-server starting");

    // ── 3. Catalog ─────────────────────────────────────────────────────────────
    let store = SqliteCatalog::connect(&cfg.database_url).await?;
    info!(
        database_url = %cfg.database_url,
        cars = store.count().await?,
        "catalog ready"
    );
    if !cfg.uploads_dir.is_dir() {
        warn!(uploads_dir = %cfg.uploads_dir.display(), "uploads directory does not exist");
    }

    // ── 4. HTTP server with graceful shutdown ──────────────────────────────────
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let state = Arc::new(AppState::new(cfg, Arc::new(store)));
    let app = routes::build(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("carlot-server stopped");
    Ok(())
}

/// `RUST_LOG` wins over `CARLOT_LOG`; an unparsable `CARLOT_LOG` falls back
/// to `info` with a warning on stderr, since the subscriber is not up yet.
fn log_filter(cfg: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|e| {
            eprintln!("WARN: CARLOT_LOG='{}' is not a valid filter ({e}); using 'info'", cfg.log_level);
            EnvFilter::new("info")
        })
}

fn init_tracing(cfg: &Config) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter(cfg))
        .with_target(true);
    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    tokio::select! {
        () = ctrl_c() => {}
        () = sigterm() => {}
    }
    info!("shutdown signal received; starting graceful shutdown");
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "cannot listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn sigterm() {
    std::future::pending::<()>().await;
}
