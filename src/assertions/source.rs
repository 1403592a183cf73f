// assertions/source.rs - What an assertion looks at
//
// A source is read into a Snapshot each time `assert_that` is called, so
// assertions always see the current state of the database. The connection
// used for the read goes back to the pool as soon as the snapshot is built.

use crate::error::FetchError;
use crate::setup::quote_identifier;
use crate::value::{ColumnType, Storage, Value};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Column, Executor, Row, SqlitePool, Statement, TypeInfo};
use std::future::Future;

/// Something that can be read into a snapshot.
pub trait Source {
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FetchError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: ColumnType,
}

/// Rows and column metadata read at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    description: String,
    columns: Vec<ColumnInfo>,
    rows: Vec<Vec<Value>>,
}

impl Snapshot {
    pub fn new(description: impl Into<String>, columns: Vec<ColumnInfo>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            description: description.into(),
            columns,
            rows,
        }
    }

    /// e.g. "membres table"
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Position of a column, ignoring ASCII case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// A whole table, rows in insertion order unless `order_by` says otherwise.
///
/// Insertion order is `rowid` order. A table whose `INTEGER PRIMARY KEY`
/// aliases `rowid` therefore comes back in key order instead.
#[derive(Debug, Clone)]
pub struct Table {
    pool: SqlitePool,
    name: String,
    order_by: Vec<String>,
    columns_to_check: Vec<String>,
}

impl Table {
    pub fn new(pool: &SqlitePool, name: &str) -> Self {
        Self {
            pool: pool.clone(),
            name: name.to_string(),
            order_by: Vec::new(),
            columns_to_check: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order_by(mut self, columns: &[&str]) -> Self {
        self.order_by = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Only read these columns (kept in table order).
    pub fn columns_to_check(mut self, columns: &[&str]) -> Self {
        self.columns_to_check = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    async fn table_columns(&self, conn: &mut SqliteConnection) -> Result<Vec<ColumnInfo>, FetchError> {
        let pragma = format!("PRAGMA table_info({})", quote_identifier(&self.name));
        let info = sqlx::query(&pragma).fetch_all(&mut *conn).await?;

        if info.is_empty() {
            return Err(FetchError::UnknownTable(self.name.clone()));
        }

        let all = info
            .iter()
            .map(|row| {
                let name: String = row.try_get("name")?;
                let declared: String = row.try_get("type")?;
                Ok(ColumnInfo {
                    name,
                    column_type: ColumnType::from_declared(&declared),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        for column in self.columns_to_check.iter().chain(&self.order_by) {
            if !all.iter().any(|c| c.name.eq_ignore_ascii_case(column)) {
                return Err(FetchError::UnknownColumn {
                    table: self.name.clone(),
                    column: column.clone(),
                });
            }
        }

        if self.columns_to_check.is_empty() {
            return Ok(all);
        }

        Ok(all
            .into_iter()
            .filter(|c| {
                self.columns_to_check
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(&c.name))
            })
            .collect())
    }
}

impl Source for Table {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        if self.name.trim().is_empty() {
            return Err(FetchError::InvalidIdentifier(self.name.clone()));
        }

        let mut conn = self.pool.acquire().await?;
        let columns = self.table_columns(&mut *conn).await?;

        let select_list = columns
            .iter()
            .map(|c| quote_identifier(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let order = if self.order_by.is_empty() {
            "rowid".to_string()
        } else {
            self.order_by
                .iter()
                .map(|c| quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let select = format!(
            "SELECT {} FROM {} ORDER BY {}",
            select_list,
            quote_identifier(&self.name),
            order
        );

        let rows = sqlx::query(&select).fetch_all(&mut *conn).await?;
        let rows = decode_rows(&rows, &columns)?;
        tracing::debug!("{} -> {} rows", select, rows.len());

        Ok(Snapshot::new(format!("{} table", self.name), columns, rows))
    }
}

/// The result of an arbitrary query.
#[derive(Debug, Clone)]
pub struct Request {
    pool: SqlitePool,
    sql: String,
}

impl Request {
    pub fn new(pool: &SqlitePool, sql: &str) -> Self {
        Self {
            pool: pool.clone(),
            sql: sql.to_string(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl Source for Request {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let mut conn = self.pool.acquire().await?;

        // Column metadata comes from the prepared statement, so it is known
        // even when the query returns no row.
        let statement = (&mut *conn).prepare(&self.sql).await?;
        let columns = statement
            .columns()
            .iter()
            .map(|c| ColumnInfo {
                name: c.name().to_string(),
                column_type: ColumnType::from_declared(c.type_info().name()),
            })
            .collect::<Vec<_>>();

        let rows = sqlx::query(&self.sql).fetch_all(&mut *conn).await?;
        let rows = decode_rows(&rows, &columns)?;
        tracing::debug!("{} -> {} rows", self.sql, rows.len());

        Ok(Snapshot::new(format!("'{}' request", self.sql), columns, rows))
    }
}

fn decode_rows(rows: &[SqliteRow], columns: &[ColumnInfo]) -> Result<Vec<Vec<Value>>, sqlx::Error> {
    rows.iter().map(|row| decode_row(row, columns)).collect()
}

fn decode_row(row: &SqliteRow, columns: &[ColumnInfo]) -> Result<Vec<Value>, sqlx::Error> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let storage = Storage::read(row, i)?;
            Ok(storage.into_value(column.column_type))
        })
        .collect()
}
