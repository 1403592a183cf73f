// assertions/column.rs - Checks on one column

use super::check_values;
use super::source::Snapshot;
use super::value::ValueAssert;
use crate::error::AssertionError;
use crate::value::Value;

#[derive(Debug, Clone, Copy)]
pub struct ColumnAssert<'a> {
    snapshot: &'a Snapshot,
    index: usize,
}

impl<'a> ColumnAssert<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot, index: usize) -> Self {
        Self { snapshot, index }
    }

    pub fn name(&self) -> &'a str {
        &self.snapshot.columns()[self.index].name
    }

    fn cells(&self) -> impl ExactSizeIterator<Item = &'a Value> + 'a {
        let index = self.index;
        self.snapshot.rows().iter().map(move |row| &row[index])
    }

    fn target(&self) -> String {
        format!(
            "column at index {} (column name: {}) of {}",
            self.index,
            self.name(),
            self.snapshot.description()
        )
    }

    /// The column is named exactly `expected`.
    pub fn has_column_name(self, expected: &str) -> Result<Self, AssertionError> {
        let actual = self.name();
        if actual != expected {
            return Err(AssertionError::new(
                self.target(),
                "column name",
                format!("{:?}", expected),
                format!("{:?}", actual),
            ));
        }
        Ok(self)
    }

    /// Select the value at row `index`.
    pub fn value(self, index: usize) -> Result<ValueAssert<'a>, AssertionError> {
        let rows = self.snapshot.rows();
        let row = rows.get(index).ok_or_else(|| {
            AssertionError::new(
                self.target(),
                "row index",
                format!("index < {}", rows.len()),
                index,
            )
        })?;

        let target = format!("value at index {} of {}", index, self.target());
        Ok(ValueAssert::new(&row[self.index], target))
    }

    /// Every cell of the column, in row order.
    pub fn has_values(self, expected: &[Value]) -> Result<Self, AssertionError> {
        check_values(&self.target(), self.cells(), expected)?;
        Ok(self)
    }

    pub fn has_only_null_values(self) -> Result<Self, AssertionError> {
        if let Some((i, value)) = self.cells().enumerate().find(|(_, v)| !v.is_null()) {
            return Err(AssertionError::new(
                self.target(),
                format!("only null values (value at index {})", i),
                Value::Null,
                value,
            ));
        }
        Ok(self)
    }

    pub fn has_only_not_null_values(self) -> Result<Self, AssertionError> {
        if let Some((i, _)) = self.cells().enumerate().find(|(_, v)| v.is_null()) {
            return Err(AssertionError::new(
                self.target(),
                format!("only not null values (value at index {})", i),
                "not null",
                Value::Null,
            ));
        }
        Ok(self)
    }
}
