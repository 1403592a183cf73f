// assertions/mod.rs - Declarative checks on table contents
//
// Usage:
//
//   let table = Table::new(&pool, "membres");
//   assert_that(&table).await?.has_number_of_rows(4)?;
//   assert_that(&table).await?.row(2)?.value("nom")?.is_equal_to("Clayton")?;
//   assert_that(&table).await?.column_named("surnom")?.value(3)?.is_null()?;
//
// Every check returns either the same assertion (so checks chain) or an
// AssertionError naming the target, the check, the expected and the actual
// value. Indexes are 0-based.

pub mod column;
pub mod row;
pub mod source;
pub mod table;
pub mod value;

pub use column::ColumnAssert;
pub use row::RowAssert;
pub use source::{ColumnInfo, Request, Snapshot, Source, Table};
pub use table::TableAssert;
pub use value::ValueAssert;

use crate::error::{AssertionError, FetchError};
use crate::value::Value;

/// Read `source` now and start a chain of checks on what was read.
pub async fn assert_that<S: Source>(source: &S) -> Result<TableAssert, FetchError> {
    let snapshot = source.fetch().await?;
    Ok(TableAssert::new(snapshot))
}

/// Compare a list of cells with a list of expectations, reporting the first
/// mismatch.
pub(crate) fn check_values<'a>(
    target: &str,
    actual: impl ExactSizeIterator<Item = &'a Value>,
    expected: &[Value],
) -> Result<(), AssertionError> {
    if actual.len() != expected.len() {
        return Err(AssertionError::new(
            target,
            "number of values",
            expected.len(),
            actual.len(),
        ));
    }

    for (i, (actual, expected)) in actual.zip(expected).enumerate() {
        if !actual.matches(expected) {
            return Err(AssertionError::new(
                target,
                format!("value at index {}", i),
                expected,
                actual,
            ));
        }
    }
    Ok(())
}
