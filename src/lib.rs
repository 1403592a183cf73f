// lib.rs - Root module for the table_fixtures library
//
// Two pieces work together in every test:
// - setup + fixtures put a table in a known state (delete all, insert rows)
// - assertions read the table back and check rows, columns and values

pub mod assertions;
pub mod config;
pub mod db;
pub mod error;
/// The fixtures module contains reusable test data and table definitions
pub mod fixtures;
pub mod setup;
pub mod telemetry;
pub mod value;

pub use assertions::{assert_that, Request, Table};
pub use config::DbConfig;
pub use db::TestDatabase;
pub use error::{AssertionError, ConfigError, FetchError, SetupError};
pub use setup::DbSetup;
pub use telemetry::init_tracing;
pub use value::Value;
