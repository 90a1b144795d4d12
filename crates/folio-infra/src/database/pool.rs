use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the database pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Connection pool for the main database.
///
/// Repositories hold clones of [`DatabasePool::conn`]; connections are checked out
/// per query and returned to the pool when the query completes or fails.
#[derive(Clone)]
pub struct DatabasePool {
    pub conn: DbConn,
}

impl DatabasePool {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection pool...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {}..{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self { conn })
    }

    /// Round-trip to the server, for health checks.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}
