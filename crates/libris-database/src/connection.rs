//! PostgreSQL pool for the `postgres` backend, and the store status reported
//! by the health endpoint.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use libris_core::config::DatabaseConfig;
use libris_core::error::{AppError, ErrorKind};
use libris_core::result::AppResult;

/// Reachability of the user and token stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// The in-memory store is in use; it is always reachable.
    Memory,
    /// PostgreSQL answered `SELECT 1`.
    Connected,
    /// PostgreSQL did not answer.
    Unavailable,
}

impl StoreStatus {
    /// Whether requests touching the stores can currently succeed.
    pub fn is_available(self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// Label used in the health response.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Connected => "connected",
            Self::Unavailable => "unavailable",
        }
    }
}

/// The sqlx pool behind [`crate::UserRepository`] and [`crate::TokenRepository`].
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect using the `database` configuration section.
    ///
    /// A URL that does not parse is a configuration error; a server that
    /// cannot be reached is a database error.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = connect_options(config)?;

        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            user = options.get_username(),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL store"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "PostgreSQL unreachable", e))?;

        Ok(Self { pool })
    }

    /// The underlying sqlx pool, for repositories and migrations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check that the server answers a trivial query.
    pub async fn status(&self) -> StoreStatus {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(1) => StoreStatus::Connected,
            Ok(other) => {
                warn!(result = other, "Unexpected health query result");
                StoreStatus::Unavailable
            }
            Err(e) => {
                warn!(error = %e, "PostgreSQL health query failed");
                StoreStatus::Unavailable
            }
        }
    }

    /// Close all connections; called once the server has drained.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

fn connect_options(config: &DatabaseConfig) -> AppResult<PgConnectOptions> {
    config.url.parse::<PgConnectOptions>().map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "database.url is not a valid PostgreSQL URL",
            e,
        )
    })
}
