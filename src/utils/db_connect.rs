// src/utils/db_connect.rs
use anyhow::{Context, Result};
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use log::info;
use std::time::Duration;
use tokio_postgres::{Config, NoTls};

pub type PgPool = Pool<PostgresConnectionManager<NoTls>>;

/// Reads environment variables and constructs a PostgreSQL config.
fn build_pg_config() -> Config {
    let mut config = Config::new();
    let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port_str = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let port = port_str.parse::<u16>().unwrap_or(5432);
    let dbname = std::env::var("POSTGRES_DB").unwrap_or_else(|_| "travel".to_string());
    let user = std::env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = std::env::var("POSTGRES_PASSWORD").unwrap_or_default();

    info!(
        "DB Config: Host={}, Port={}, DB={}, User={}",
        host, port, dbname, user
    );
    config
        .host(&host)
        .port(port)
        .dbname(&dbname)
        .user(&user)
        .password(&password);
    config.application_name("listing_reconciliation");
    config.connect_timeout(Duration::from_secs(10));
    config
}

/// Builds the catalog connection pool without opening a connection. An
/// unreachable database shows up on the first checkout, where the catalog
/// source turns it into a recoverable fetch failure.
pub fn connect_lazy() -> PgPool {
    let manager = PostgresConnectionManager::new(build_pg_config(), NoTls);
    Pool::builder()
        .max_size(8)
        .idle_timeout(Some(Duration::from_secs(180)))
        .connection_timeout(Duration::from_secs(10))
        .build_unchecked(manager)
}

/// Initializes the pool and verifies it with a test query.
pub async fn connect() -> Result<PgPool> {
    info!("Connecting to PostgreSQL database...");
    let pool = connect_lazy();
    let conn = pool
        .get()
        .await
        .context("Failed to get test connection from pool")?;
    conn.query_one("SELECT 1", &[])
        .await
        .context("Test query 'SELECT 1' failed")?;
    drop(conn);
    info!("Database connection pool initialized successfully.");
    Ok(pool)
}
