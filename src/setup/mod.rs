// setup/mod.rs - Fixture loader
//
// DbSetup runs an operation tree against a pool inside one transaction:
// either every statement succeeds and the transaction commits, or the first
// failure rolls everything back and is returned to the caller.

pub mod operations;

pub use operations::{
    delete_all_from, insert_into, quote_identifier, sequence_of, sql, Insert, InsertBuilder,
    Operation,
};

use crate::error::SetupError;
use crate::value::Value;
use rust_decimal::prelude::ToPrimitive;
use sqlx::sqlite::{SqliteArguments, SqliteConnection};
use sqlx::query::Query;
use sqlx::{Sqlite, SqlitePool};

pub struct DbSetup<'p> {
    pool: &'p SqlitePool,
    operation: Operation,
}

impl<'p> DbSetup<'p> {
    pub fn new(pool: &'p SqlitePool, operation: Operation) -> Self {
        Self { pool, operation }
    }

    /// Execute the operation.
    ///
    /// # Errors
    ///
    /// - `SetupError::Connection` if no connection or transaction can be obtained
    /// - `SetupError::ConstraintViolation` if a row breaks a column constraint
    /// - `SetupError::Statement` for any other failing statement
    ///
    /// On error nothing done by this launch stays visible.
    pub async fn launch(&self) -> Result<(), SetupError> {
        let mut tx = self.pool.begin().await.map_err(SetupError::Connection)?;

        for leaf in self.operation.leaves() {
            if let Err(err) = execute(&mut *tx, leaf).await {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("Rollback after failed fixture load failed: {}", rollback_err);
                }
                return Err(err);
            }
        }

        tx.commit().await.map_err(SetupError::Connection)?;
        tracing::debug!("Fixture committed");
        Ok(())
    }
}

async fn execute(conn: &mut SqliteConnection, operation: &Operation) -> Result<(), SetupError> {
    match operation {
        Operation::DeleteAll(table) => {
            let statement = format!("DELETE FROM {}", quote_identifier(table));
            let result = sqlx::query(&statement)
                .execute(&mut *conn)
                .await
                .map_err(|e| SetupError::from_statement(&statement, e))?;
            tracing::debug!("{} ({} rows)", statement, result.rows_affected());
        }
        Operation::Insert(insert) => {
            let statement = insert.statement();
            for row in insert.rows() {
                let query = row
                    .iter()
                    .fold(sqlx::query(&statement), |query, value| bind_value(query, value));
                query
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| SetupError::from_statement(&statement, e))?;
            }
            tracing::debug!("{} ({} rows)", statement, insert.rows().len());
        }
        Operation::Sql(statement) => {
            sqlx::query(statement)
                .execute(&mut *conn)
                .await
                .map_err(|e| SetupError::from_statement(statement, e))?;
            tracing::debug!("{}", statement);
        }
        // flattened by Operation::leaves
        Operation::Sequence(_) => {}
    }
    Ok(())
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Integer(i) => query.bind(*i),
        // SQLite has no decimal storage, DECIMAL columns hold REAL
        Value::Decimal(d) => query.bind(d.to_f64()),
        Value::Text(s) => query.bind(s.as_str()),
        Value::Date(d) => query.bind(*d),
        Value::Bytes(b) => query.bind(b.as_slice()),
    }
}
