// fixtures/mod.rs
//
// A `TestTable` knows its schema and its rows. `fixture()` turns them into
// delete-all-then-insert, and `load_fixture` runs that through `DbSetup`.

pub mod tables;

use crate::error::SetupError;
use crate::setup::{delete_all_from, insert_into, sequence_of, DbSetup, Operation};
use crate::value::Value;
use sqlx::SqlitePool;

/// A table that can be created and filled with a known set of rows.
pub trait TestTable {
    /// Name of the table
    fn name() -> &'static str;

    /// CREATE TABLE statement
    fn schema_sql() -> &'static str;

    /// Column names in insertion order
    fn columns() -> &'static [&'static str];

    /// Fixture rows, each matching `columns()`
    fn rows() -> Vec<Vec<Value>>;

    /// Delete every row, then insert the fixture rows in order.
    fn fixture() -> Result<Operation, SetupError> {
        let insert = Self::rows()
            .into_iter()
            .fold(insert_into(Self::name()).columns(Self::columns()), |builder, row| {
                builder.values(row)
            })
            .build()?;

        Ok(sequence_of([delete_all_from(Self::name()), insert]))
    }
}

/// Create the table of `T`.
pub async fn create_schema<T: TestTable>(pool: &SqlitePool) -> Result<(), SetupError> {
    let statement = T::schema_sql();
    sqlx::query(statement)
        .execute(pool)
        .await
        .map_err(|e| SetupError::from_statement(statement, e))?;

    tracing::info!("Created table {}", T::name());
    Ok(())
}

/// Reset the table of `T` to its fixture rows.
pub async fn load_fixture<T: TestTable>(pool: &SqlitePool) -> Result<(), SetupError> {
    DbSetup::new(pool, T::fixture()?).launch().await?;

    tracing::info!("Loaded fixture into {}", T::name());
    Ok(())
}
