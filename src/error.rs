// error.rs - Error types for fixture loading and table assertions
//
// Three kinds of failure can happen in a database test:
// 1. Setup failure: the fixture could not be loaded (SetupError)
// 2. Assertion failure: a check did not hold (AssertionError)
// 3. Fetch failure: the assertion target could not be read (FetchError)
//
// Resource failures (a rollback or a close that fails) are only logged,
// so they never hide one of the errors above.

use thiserror::Error;

/// Errors raised while connecting, creating the schema or loading a fixture.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("database connection unavailable: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("constraint violation while executing `{statement}`: {message}")]
    ConstraintViolation { statement: String, message: String },

    #[error("statement failed `{statement}`: {source}")]
    Statement {
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("invalid fixture for table {table}: {reason}")]
    InvalidFixture { table: String, reason: String },
}

impl SetupError {
    /// Classify a driver error raised by `statement`.
    ///
    /// Unique, not-null, check and foreign key failures become
    /// `ConstraintViolation`; everything else stays a `Statement` error.
    pub fn from_statement(statement: &str, err: sqlx::Error) -> Self {
        let violation = match &err {
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation => Some(db.message().to_string()),
                // Older SQLite builds report constraints without extended codes
                _ if db.message().contains("constraint failed") => Some(db.message().to_string()),
                _ => None,
            },
            _ => None,
        };

        match violation {
            Some(message) => SetupError::ConstraintViolation {
                statement: statement.to_string(),
                message,
            },
            None => SetupError::Statement {
                statement: statement.to_string(),
                source: err,
            },
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, SetupError::ConstraintViolation { .. })
    }
}

/// Errors raised while reading an assertion target.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("table {0} does not exist")]
    UnknownTable(String),

    #[error("column {column} does not exist in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// A check that did not hold.
///
/// Carries everything needed to diagnose a failing test without a debugger:
/// what was checked, on which target, what was expected and what was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{target}] {check}\n  expected: {expected}\n  actual:   {actual}")]
pub struct AssertionError {
    pub target: String,
    pub check: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionError {
    pub fn new(
        target: impl Into<String>,
        check: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self {
            target: target.into(),
            check: check.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Malformed configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
