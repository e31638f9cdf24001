//! PostgreSQL persistence for the storefront.
//!
//! - [`models`] -- row structs and write DTOs.
//! - [`repositories`] -- zero-sized `*Repo` structs with async query methods.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default maximum pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
/// Default time to wait for a free connection before failing.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
/// Default server-side statement timeout.
const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 5_000;

/// Connection settings for the pool.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Applied as the PostgreSQL `statement_timeout` on every connection so no
    /// single query can hold a request open indefinitely.
    pub statement_timeout_ms: u64,
}

impl DbConfig {
    /// Load database configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `DATABASE_URL`            | **yes**  | --      |
    /// | `DB_MAX_CONNECTIONS`      | no       | `20`    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | no       | `5`     |
    /// | `DB_STATEMENT_TIMEOUT_MS` | no       | `5000`  |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is missing or a numeric variable does not parse.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        let statement_timeout_ms: u64 = std::env::var("DB_STATEMENT_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_STATEMENT_TIMEOUT_MS.to_string())
            .parse()
            .expect("DB_STATEMENT_TIMEOUT_MS must be a valid u64");

        Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
            statement_timeout_ms,
        }
    }
}

/// Create a connection pool with bounded acquire and statement timeouts.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database_url)?
        .options([("statement_timeout", config.statement_timeout_ms.to_string())]);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
