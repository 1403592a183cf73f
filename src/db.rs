// db.rs - Database handle for tests
//
// The handle owns the connection pool. Tests create one, use it for both
// fixture loading and assertions, then close it. Nothing is kept in a
// global, so every test gets its own in-memory database.

use crate::config::DbConfig;
use crate::error::SetupError;
use crate::fixtures::tables::MembresTable;
use crate::fixtures::{create_schema, load_fixture, TestTable};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Open the pool and create the membres table.
    pub async fn connect(config: &DbConfig) -> Result<Self, SetupError> {
        // An in-memory database lives as long as one of its connections,
        // so the pool never reaps idle ones.
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(&config.database_url)
            .await
            .map_err(SetupError::Connection)?;

        tracing::info!("Connected to {}", config.database_url);

        create_schema::<MembresTable>(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, SetupError> {
        Self::connect(&DbConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Reset the table of `T` to its fixture rows.
    pub async fn load<T: TestTable>(&self) -> Result<(), SetupError> {
        load_fixture::<T>(&self.pool).await
    }

    /// Close every connection. The in-memory database is discarded.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::debug!("Database pool closed");
    }
}
