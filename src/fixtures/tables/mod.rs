// fixtures/tables/mod.rs
//
// This module contains definitions for test tables.
// Each test table is a struct that implements the TestTable trait.

pub mod membres;

pub use membres::{Membre, MembresTable};
