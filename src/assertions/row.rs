// assertions/row.rs - Checks on one row

use super::check_values;
use super::source::Snapshot;
use super::table::column_names;
use super::value::ValueAssert;
use crate::error::AssertionError;
use crate::value::Value;

#[derive(Debug, Clone, Copy)]
pub struct RowAssert<'a> {
    snapshot: &'a Snapshot,
    index: usize,
}

impl<'a> RowAssert<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot, index: usize) -> Self {
        Self { snapshot, index }
    }

    fn cells(&self) -> &'a [Value] {
        &self.snapshot.rows()[self.index]
    }

    fn target(&self) -> String {
        format!("row at index {} of {}", self.index, self.snapshot.description())
    }

    /// Select the value of the named column.
    pub fn value(self, column: &str) -> Result<ValueAssert<'a>, AssertionError> {
        let index = self.snapshot.column_index(column).ok_or_else(|| {
            AssertionError::new(
                self.target(),
                "column name",
                format!("one of {}", column_names(self.snapshot)),
                format!("{:?}", column),
            )
        })?;
        self.value_at(index)
    }

    /// Select the value in the column at `index`.
    pub fn value_at(self, index: usize) -> Result<ValueAssert<'a>, AssertionError> {
        let cells = self.cells();
        let value = cells.get(index).ok_or_else(|| {
            AssertionError::new(
                self.target(),
                "column index",
                format!("index < {}", cells.len()),
                index,
            )
        })?;

        let column = &self.snapshot.columns()[index].name;
        let target = format!("value of column {:?} in {}", column, self.target());
        Ok(ValueAssert::new(value, target))
    }

    pub fn has_number_of_columns(self, expected: usize) -> Result<Self, AssertionError> {
        let actual = self.cells().len();
        if actual != expected {
            return Err(AssertionError::new(
                self.target(),
                "number of columns",
                expected,
                actual,
            ));
        }
        Ok(self)
    }

    /// Every cell of the row, in column order.
    pub fn has_values(self, expected: &[Value]) -> Result<Self, AssertionError> {
        check_values(&self.target(), self.cells().iter(), expected)?;
        Ok(self)
    }
}
