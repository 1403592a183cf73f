// common/mod.rs
// One private in-memory database per test, membres loaded, closed afterwards.

#![allow(dead_code)]

use sqlx::SqlitePool;
use table_fixtures::fixtures::tables::MembresTable;
use table_fixtures::{init_tracing, TestDatabase};

/// Create a database with the membres table, but without rows
pub async fn create_test_db() -> anyhow::Result<TestDatabase> {
    init_tracing();
    let db = TestDatabase::in_memory().await?;
    Ok(db)
}

/// Create a database and load the membres fixture
pub async fn setup_test_db() -> anyhow::Result<TestDatabase> {
    let db = create_test_db().await?;
    db.load::<MembresTable>().await?;
    Ok(db)
}

/// Full setup and teardown wrapper for tests
///
/// # Arguments
/// * `test_fn` - Test function that receives the pool of the database
pub async fn with_membres_db<F, Fut>(test_fn: F) -> anyhow::Result<()>
where
    F: FnOnce(SqlitePool) -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<()>>,
{
    let db = setup_test_db().await?;

    let result = test_fn(db.pool().clone()).await;

    // Always close, even if the test failed
    db.close().await;

    result
}
