// fixtures/tables/membres.rs
//
// The membres table: the four members of a band, two of them without a
// nickname. Every test starts from exactly these rows.

use crate::fixtures::TestTable;
use crate::value::{ColumnType, Storage, Value};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// One row of the membres table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membre {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub surnom: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub taille: Option<Decimal>,
}

impl Membre {
    /// Cells in the column order of `MembresTable::columns()`
    pub fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.id),
            Value::from(self.nom.as_str()),
            Value::from(self.prenom.as_str()),
            Value::from(self.surnom.clone()),
            Value::from(self.date_naissance),
            Value::from(self.taille),
        ]
    }

    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        // DECIMAL has NUMERIC affinity: 1.75 is stored as REAL, 2.0 as INTEGER
        let taille = match Storage::read(row, "taille")?.into_value(ColumnType::Decimal) {
            Value::Decimal(d) => Some(d),
            _ => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            nom: row.try_get("nom")?,
            prenom: row.try_get("prenom")?,
            surnom: row.try_get("surnom")?,
            date_naissance: row.try_get("date_naissance")?,
            taille,
        })
    }

    /// Read every row back, in id order.
    pub async fn fetch_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, nom, prenom, surnom, date_naissance, taille FROM membres ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    /// The fixture rows
    pub fn fixture() -> Vec<Self> {
        vec![
            Self::new(1, "Hewson", "Paul David", Some("Bono"), (1960, 5, 10), Decimal::new(175, 2)),
            Self::new(2, "Evans", "David Howell", Some("The Edge"), (1961, 8, 8), Decimal::new(177, 2)),
            Self::new(3, "Clayton", "Adam", None, (1960, 3, 13), Decimal::new(178, 2)),
            Self::new(4, "Mullen", "Larry", None, (1961, 10, 31), Decimal::new(170, 2)),
        ]
    }

    fn new(
        id: i64,
        nom: &str,
        prenom: &str,
        surnom: Option<&str>,
        (year, month, day): (i32, u32, u32),
        taille: Decimal,
    ) -> Self {
        Self {
            id,
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            surnom: surnom.map(str::to_string),
            date_naissance: NaiveDate::from_ymd_opt(year, month, day),
            taille: Some(taille),
        }
    }
}

pub struct MembresTable;

impl TestTable for MembresTable {
    fn name() -> &'static str {
        "membres"
    }

    /// `id` is declared NUMBER rather than INTEGER so it does not alias
    /// `rowid`, which then keeps counting rows in insertion order.
    fn schema_sql() -> &'static str {
        r#"
        CREATE TABLE IF NOT EXISTS membres (
            id NUMBER NOT NULL PRIMARY KEY,
            nom TEXT NOT NULL,
            prenom TEXT NOT NULL,
            surnom TEXT NULL,
            date_naissance DATE NULL,
            taille DECIMAL NULL
        )
        "#
    }

    fn columns() -> &'static [&'static str] {
        &["id", "nom", "prenom", "surnom", "date_naissance", "taille"]
    }

    fn rows() -> Vec<Vec<Value>> {
        Membre::fixture().iter().map(Membre::values).collect()
    }
}
