// assertions/table.rs - Checks on a whole snapshot

use super::column::ColumnAssert;
use super::row::RowAssert;
use super::source::Snapshot;
use crate::error::AssertionError;

#[derive(Debug, Clone)]
pub struct TableAssert {
    snapshot: Snapshot,
}

impl TableAssert {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn has_number_of_rows(&self, expected: usize) -> Result<&Self, AssertionError> {
        let actual = self.snapshot.rows().len();
        if actual != expected {
            return Err(AssertionError::new(
                self.snapshot.description(),
                "number of rows",
                expected,
                actual,
            ));
        }
        Ok(self)
    }

    pub fn has_number_of_columns(&self, expected: usize) -> Result<&Self, AssertionError> {
        let actual = self.snapshot.columns().len();
        if actual != expected {
            return Err(AssertionError::new(
                self.snapshot.description(),
                "number of columns",
                expected,
                actual,
            ));
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> Result<&Self, AssertionError> {
        self.has_number_of_rows(0)
    }

    /// Select the row at `index`.
    pub fn row(&self, index: usize) -> Result<RowAssert<'_>, AssertionError> {
        let rows = self.snapshot.rows().len();
        if index >= rows {
            return Err(AssertionError::new(
                self.snapshot.description(),
                "row index",
                format!("index < {}", rows),
                index,
            ));
        }
        Ok(RowAssert::new(&self.snapshot, index))
    }

    /// Select the column at `index`.
    pub fn column(&self, index: usize) -> Result<ColumnAssert<'_>, AssertionError> {
        let columns = self.snapshot.columns().len();
        if index >= columns {
            return Err(AssertionError::new(
                self.snapshot.description(),
                "column index",
                format!("index < {}", columns),
                index,
            ));
        }
        Ok(ColumnAssert::new(&self.snapshot, index))
    }

    /// Select a column by name (ASCII case-insensitive).
    pub fn column_named(&self, name: &str) -> Result<ColumnAssert<'_>, AssertionError> {
        match self.snapshot.column_index(name) {
            Some(index) => Ok(ColumnAssert::new(&self.snapshot, index)),
            None => Err(AssertionError::new(
                self.snapshot.description(),
                "column name",
                format!("one of {}", column_names(&self.snapshot)),
                format!("{:?}", name),
            )),
        }
    }
}

pub(crate) fn column_names(snapshot: &Snapshot) -> String {
    let names = snapshot
        .columns()
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    format!("[{}]", names.join(", "))
}
