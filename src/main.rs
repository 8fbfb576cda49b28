//! Libris Server: library management API.
//!
//! Main entry point that wires the crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use libris_api::AppState;
use libris_auth::TokenIssuer;
use libris_core::config::{AppConfig, DatabaseBackend};
use libris_database::{
    DatabasePool, MemoryStore, TokenRepository, TokenStore, UserRepository, UserStore,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("LIBRIS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = ?e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Libris v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Persistence ──────────────────────────────────────
    tracing::info!(backend = ?config.database.backend, "Selected persistence backend");
    let (users, tokens, db_pool) = match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database)
                .await
                .context("database connection failed")?;

            if config.database.run_migrations {
                libris_database::migration::run_migrations(pool.pool())
                    .await
                    .context("migration failed")?;
            }

            let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.pool().clone()));
            let tokens: Arc<dyn TokenStore> =
                Arc::new(TokenRepository::new(pool.pool().clone()));
            (users, tokens, Some(pool))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            let store = MemoryStore::new();
            let users: Arc<dyn UserStore> = Arc::new(store.clone());
            let tokens: Arc<dyn TokenStore> = Arc::new(store);
            (users, tokens, None)
        }
    };

    // ── Step 2: Shutdown channel and token sweep ─────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweep_handle = sweep_period(config.auth.token_sweep_interval_minutes).map(|every| {
        tokio::spawn(sweep_expired_tokens(
            TokenIssuer::new(Arc::clone(&tokens)),
            every,
            shutdown_rx,
        ))
    });

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let state = AppState::new(config, users, tokens, db_pool.clone())
        .context("failed to initialize application state")?;
    let app = libris_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(address = %addr, "Libris server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .context("server error")?;

    // ── Step 4: Wait for background tasks ────────────────────────
    if let Some(handle) = sweep_handle {
        let _ = tokio::time::timeout(Duration::from_secs(10), handle).await;
    }

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Libris server shut down gracefully");
    Ok(())
}

/// Sweep period for `auth.token_sweep_interval_minutes`; `None` when disabled.
fn sweep_period(minutes: u64) -> Option<Duration> {
    (minutes > 0).then(|| Duration::from_secs(minutes.saturating_mul(60)))
}

/// Periodically delete expired token rows until shutdown.
async fn sweep_expired_tokens(
    issuer: TokenIssuer,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match issuer.purge_expired().await {
                    Ok(0) => {}
                    Ok(removed) => tracing::info!(removed, "Purged expired tokens"),
                    Err(e) => tracing::warn!(error = %e, "Expired token sweep failed"),
                }
            }
            _ = shutdown.changed() => break,
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
