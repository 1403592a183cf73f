// value.rs - Typed cell values
//
// SQLite only stores five kinds of values (NULL, INTEGER, REAL, TEXT, BLOB).
// A DATE column holds TEXT and a DECIMAL column holds REAL, so we use the
// declared column type to turn raw storage back into the value the fixture
// inserted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{ColumnIndex, Row, TypeInfo, ValueRef};
use std::fmt;
use std::str::FromStr;

/// Format used by SQLite (and sqlx) for dates stored as TEXT.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One cell of a table, either inserted by a fixture or read back from it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Compare a stored value with an expectation under the semantic type of
    /// the stored value.
    ///
    /// Integers and decimals compare numerically, text compares exactly and
    /// dates compare by calendar day. A date also matches its ISO text form.
    /// Null only matches null.
    pub fn matches(&self, expected: &Value) -> bool {
        match (self, expected) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Integer(a), Value::Decimal(b)) | (Value::Decimal(b), Value::Integer(a)) => {
                Decimal::from(*a) == *b
            }
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Date(a), Value::Text(b)) => NaiveDate::parse_from_str(b, DATE_FORMAT)
                .map(|b| *a == b)
                .unwrap_or(false),
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            _ => false,
        }
    }

    /// Name of the variant, used in assertion messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<f64> for Value {
    /// Goes through the shortest decimal representation, so `1.7` becomes
    /// exactly `1.7`. Non-finite numbers have no decimal form and stay text.
    fn from(v: f64) -> Self {
        let text = v.to_string();
        match Decimal::from_str(&text) {
            Ok(d) => Value::Decimal(d),
            Err(_) => Value::Text(text),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Build a row of values from heterogeneous literals.
///
/// ```
/// use table_fixtures::{row, Value};
///
/// let cells = row![3, "Clayton", "Adam", Value::Null];
/// assert_eq!(cells.len(), 4);
/// ```
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::Value::from($cell)),*]
    };
}

/// Semantic type of a column, inferred from its declared SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Decimal,
    Text,
    Date,
    /// No affinity: values keep their storage type
    Any,
}

impl ColumnType {
    /// Follows SQLite's affinity rules, with DATE recognised on its own.
    /// `NUMBER` is treated as an integer type.
    pub fn from_declared(declared: &str) -> Self {
        let upper = declared.trim().to_ascii_uppercase();

        if upper == "DATE" {
            ColumnType::Date
        } else if upper.contains("INT") || upper == "NUMBER" {
            ColumnType::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            ColumnType::Text
        } else if upper.is_empty() || upper == "NULL" || upper.contains("BLOB") {
            ColumnType::Any
        } else {
            // REAL, FLOAT, DOUBLE, DECIMAL, NUMERIC and anything unknown
            ColumnType::Decimal
        }
    }
}

/// What SQLite actually stored in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Storage {
    /// Read a cell as SQLite stored it.
    ///
    /// A NUMERIC column keeps a whole REAL as INTEGER, so the storage class
    /// of each value decides how it is decoded, not the column.
    pub fn read<I>(row: &SqliteRow, index: I) -> Result<Self, sqlx::Error>
    where
        I: ColumnIndex<SqliteRow> + Copy,
    {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Storage::Null);
        }

        let storage = match raw.type_info().name() {
            "INTEGER" => Storage::Integer(row.try_get(index)?),
            "REAL" => Storage::Real(row.try_get(index)?),
            "TEXT" => Storage::Text(row.try_get(index)?),
            _ => Storage::Blob(row.try_get(index)?),
        };
        Ok(storage)
    }

    /// Interpret raw storage under the declared column type.
    ///
    /// Storage that does not fit the column type (SQLite allows any value in
    /// any column) keeps its natural interpretation.
    pub fn into_value(self, column_type: ColumnType) -> Value {
        match (self, column_type) {
            (Storage::Null, _) => Value::Null,
            (Storage::Integer(i), ColumnType::Decimal) => Value::Decimal(Decimal::from(i)),
            (Storage::Integer(i), _) => Value::Integer(i),
            (Storage::Real(r), _) => Value::from(r),
            (Storage::Text(s), ColumnType::Date) => match NaiveDate::parse_from_str(&s, DATE_FORMAT) {
                Ok(date) => Value::Date(date),
                Err(_) => Value::Text(s),
            },
            (Storage::Text(s), _) => Value::Text(s),
            (Storage::Blob(b), _) => Value::Bytes(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_numeric_equality_across_integer_and_decimal() {
        assert!(Value::Decimal(Decimal::new(200, 2)).matches(&Value::Integer(2)));
        assert!(Value::Integer(2).matches(&Value::from(2.0)));
        assert!(Value::Decimal(Decimal::new(170, 2)).matches(&Value::from(1.7)));
        assert!(!Value::Decimal(Decimal::new(175, 2)).matches(&Value::from(1.77)));
    }

    #[test]
    fn test_null_never_matches_non_null() {
        assert!(Value::Null.matches(&Value::Null));
        assert!(!Value::Null.matches(&Value::from("Bono")));
        assert!(!Value::Null.matches(&Value::from("")));
        assert!(!Value::from("Bono").matches(&Value::Null));
    }

    #[test]
    fn test_text_is_exact() {
        assert!(Value::from("Clayton").matches(&Value::from("Clayton")));
        assert!(!Value::from("Clayton").matches(&Value::from("clayton")));
        assert!(!Value::from("Clayton").matches(&Value::from("Clayton ")));
    }

    #[test]
    fn test_date_matches_date_and_iso_text() {
        let stored = Value::Date(date(1961, 8, 8));
        assert!(stored.matches(&Value::Date(date(1961, 8, 8))));
        assert!(stored.matches(&Value::from("1961-08-08")));
        assert!(!stored.matches(&Value::Date(date(1960, 8, 8))));
        assert!(!stored.matches(&Value::from("08/08/1961")));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("Bono")), Value::Text("Bono".to_string()));
    }

    #[test]
    fn test_row_macro() {
        let cells = row![1, "Hewson", None::<String>, 1.75];
        assert_eq!(
            cells,
            vec![
                Value::Integer(1),
                Value::Text("Hewson".to_string()),
                Value::Null,
                Value::Decimal(Decimal::new(175, 2)),
            ]
        );
    }

    #[test]
    fn test_column_type_from_declared() {
        assert_eq!(ColumnType::from_declared("INTEGER"), ColumnType::Integer);
        assert_eq!(ColumnType::from_declared("number"), ColumnType::Integer);
        assert_eq!(ColumnType::from_declared("varchar"), ColumnType::Text);
        assert_eq!(ColumnType::from_declared("TEXT"), ColumnType::Text);
        assert_eq!(ColumnType::from_declared("DATE"), ColumnType::Date);
        assert_eq!(ColumnType::from_declared("DECIMAL"), ColumnType::Decimal);
        assert_eq!(ColumnType::from_declared("REAL"), ColumnType::Decimal);
        assert_eq!(ColumnType::from_declared(""), ColumnType::Any);
        assert_eq!(ColumnType::from_declared("BLOB"), ColumnType::Any);
    }

    #[test]
    fn test_storage_into_value() {
        assert_eq!(
            Storage::Text("1960-05-10".into()).into_value(ColumnType::Date),
            Value::Date(date(1960, 5, 10))
        );
        assert_eq!(
            Storage::Text("not a date".into()).into_value(ColumnType::Date),
            Value::Text("not a date".into())
        );
        assert_eq!(
            Storage::Real(1.75).into_value(ColumnType::Decimal),
            Value::Decimal(Decimal::new(175, 2))
        );
        assert_eq!(
            Storage::Integer(2).into_value(ColumnType::Decimal),
            Value::Decimal(Decimal::from(2))
        );
        assert_eq!(Storage::Null.into_value(ColumnType::Text), Value::Null);
    }
}
