// setup/operations.rs - Fixture operations
//
// A fixture is described as a tree of operations:
//
//   sequence_of([
//       delete_all_from("membres"),
//       insert_into("membres").columns(&[...]).values(row![...]).build()?,
//   ])
//
// Nothing touches the database here. DbSetup executes the operations.

use crate::error::SetupError;
use crate::value::Value;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// DELETE FROM table
    DeleteAll(String),
    /// One INSERT per row, in order
    Insert(Insert),
    /// A raw SQL statement
    Sql(String),
    /// Operations run one after the other
    Sequence(Vec<Operation>),
}

impl Operation {
    /// Leaf operations in execution order.
    pub fn leaves(&self) -> Vec<&Operation> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Operation>) {
        match self {
            Operation::Sequence(ops) => {
                for op in ops {
                    op.collect_leaves(out);
                }
            }
            leaf => out.push(leaf),
        }
    }
}

/// A validated batch of rows for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Insert {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Parameterized statement shared by every row.
    pub fn statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; self.columns.len()].join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(&self.table),
            columns,
            placeholders
        )
    }
}

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl InsertBuilder {
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn values(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Check the batch: at least one column, no duplicate column, every row
    /// as wide as the column list, and every decimal storable as REAL.
    pub fn build(self) -> Result<Operation, SetupError> {
        let invalid = |reason: String| SetupError::InvalidFixture {
            table: self.table.clone(),
            reason,
        };

        if self.columns.is_empty() {
            return Err(invalid("no columns given".to_string()));
        }

        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.eq_ignore_ascii_case(column)) {
                return Err(invalid(format!("column {} listed twice", column)));
            }
        }

        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(invalid(format!(
                    "row {} has {} values but {} columns were given",
                    i,
                    row.len(),
                    self.columns.len()
                )));
            }

            for (column, value) in self.columns.iter().zip(row) {
                if let Value::Decimal(d) = value {
                    if !fits_real(d) {
                        return Err(invalid(format!(
                            "row {} column {}: {} has more digits than a REAL keeps",
                            i, column, d
                        )));
                    }
                }
            }
        }

        Ok(Operation::Insert(Insert {
            table: self.table,
            columns: self.columns,
            rows: self.rows,
        }))
    }
}

pub fn delete_all_from(table: &str) -> Operation {
    Operation::DeleteAll(table.to_string())
}

pub fn insert_into(table: &str) -> InsertBuilder {
    InsertBuilder {
        table: table.to_string(),
        columns: Vec::new(),
        rows: Vec::new(),
    }
}

pub fn sql(statement: &str) -> Operation {
    Operation::Sql(statement.to_string())
}

pub fn sequence_of(operations: impl IntoIterator<Item = Operation>) -> Operation {
    Operation::Sequence(operations.into_iter().collect())
}

/// SQLite stores decimals as REAL: the value must read back unchanged.
fn fits_real(d: &Decimal) -> bool {
    d.to_f64()
        .map(|f| Value::from(f).matches(&Value::Decimal(*d)))
        .unwrap_or(false)
}

/// Double-quote an SQL identifier, escaping embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
