// tests/membres_test.rs
// The membres fixture, read back through the table assertions

mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::with_membres_db;
use rust_decimal::Decimal;
use table_fixtures::fixtures::tables::Membre;
use table_fixtures::setup::insert_into;
use table_fixtures::{assert_that, row, DbSetup, Table, Value};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// The four basic checks on the loaded table
#[tokio::test]
async fn test_simple() -> Result<()> {
    with_membres_db(|pool| async move {
        let table = Table::new(&pool, "membres");

        // The table holds 4 rows
        assert_that(&table).await?.has_number_of_rows(4)?;

        // Column "nom" of the row at index 2 is "Clayton"
        assert_that(&table)
            .await?
            .row(2)?
            .value("nom")?
            .is_equal_to("Clayton")?;

        // Value at index 3 of column "surnom" is null
        assert_that(&table)
            .await?
            .column_named("surnom")?
            .value(3)?
            .is_null()?;

        // Column at index 4 is "date_naissance" and its value at index 1 is 1961-08-08
        assert_that(&table)
            .await?
            .column(4)?
            .has_column_name("date_naissance")?
            .value(1)?
            .is_equal_to(date(1961, 8, 8))?;

        println!("✓ membres fixture matches the walkthrough");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_round_trip_all_rows() -> Result<()> {
    with_membres_db(|pool| async move {
        let table = Table::new(&pool, "membres");
        let snapshot = assert_that(&table).await?;

        snapshot.has_number_of_rows(4)?.has_number_of_columns(6)?;

        snapshot.row(0)?.has_values(&row![
            1,
            "Hewson",
            "Paul David",
            "Bono",
            date(1960, 5, 10),
            1.75
        ])?;
        snapshot.row(1)?.has_values(&row![
            2,
            "Evans",
            "David Howell",
            "The Edge",
            date(1961, 8, 8),
            1.77
        ])?;
        snapshot.row(2)?.has_values(&row![
            3,
            "Clayton",
            "Adam",
            Value::Null,
            date(1960, 3, 13),
            1.78
        ])?;
        snapshot.row(3)?.has_values(&row![
            4,
            "Mullen",
            "Larry",
            Value::Null,
            date(1961, 10, 31),
            1.7
        ])?;

        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_round_trip_typed_rows() -> Result<()> {
    with_membres_db(|pool| async move {
        let membres = Membre::fetch_all(&pool).await?;

        assert_eq!(membres, Membre::fixture());
        assert_eq!(membres[3].taille, Some(Decimal::new(170, 2)));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_columns_in_schema_order() -> Result<()> {
    with_membres_db(|pool| async move {
        let table = Table::new(&pool, "membres");
        let snapshot = assert_that(&table).await?;

        for (i, name) in ["id", "nom", "prenom", "surnom", "date_naissance", "taille"]
            .iter()
            .enumerate()
        {
            snapshot.column(i)?.has_column_name(name)?;
        }

        snapshot
            .column_named("id")?
            .has_values(&row![1, 2, 3, 4])?
            .has_only_not_null_values()?;
        snapshot
            .column_named("nom")?
            .has_values(&row!["Hewson", "Evans", "Clayton", "Mullen"])?;
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_null_nicknames() -> Result<()> {
    with_membres_db(|pool| async move {
        let table = Table::new(&pool, "membres");
        let snapshot = assert_that(&table).await?;
        let surnom = snapshot.column_named("surnom")?;

        surnom.value(0)?.is_not_null()?.is_equal_to("Bono")?;
        surnom.value(1)?.is_equal_to("The Edge")?;
        surnom.value(2)?.is_null()?.is_not_equal_to("")?;
        surnom.value(3)?.is_null()?.is_equal_to(Value::Null)?;

        // A null cell never equals a string
        assert!(surnom.value(3)?.is_equal_to("Bono").is_err());
        assert!(surnom.value(3)?.is_equal_to("").is_err());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_semantic_equality() -> Result<()> {
    with_membres_db(|pool| async move {
        let table = Table::new(&pool, "membres");
        let snapshot = assert_that(&table).await?;

        // Numbers compare numerically whatever the literal type
        snapshot.row(3)?.value("taille")?.is_equal_to(Decimal::new(17, 1))?;
        snapshot.row(3)?.value("taille")?.is_equal_to(1.70)?;
        snapshot.row(0)?.value("id")?.is_equal_to(Decimal::ONE)?;

        // Dates also accept their ISO text
        snapshot
            .row(0)?
            .value("date_naissance")?
            .is_equal_to("1960-05-10")?;

        // Text is compared exactly
        assert!(snapshot.row(2)?.value("nom")?.is_equal_to("clayton").is_err());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_assertions_see_current_contents() -> Result<()> {
    with_membres_db(|pool| async move {
        let table = Table::new(&pool, "membres");
        assert_that(&table).await?.has_number_of_rows(4)?;

        sqlx::query("DELETE FROM membres WHERE id > 2")
            .execute(&pool)
            .await?;

        // Every assert_that reads the table again
        assert_that(&table).await?.has_number_of_rows(2)?;
        Ok(())
    })
    .await
}

#[tokio::test]
async fn test_whole_number_taille_round_trips() -> Result<()> {
    with_membres_db(|pool| async move {
        // SQLite keeps 2.00 in a DECIMAL column as the INTEGER 2
        let operation = insert_into("membres")
            .columns(&["id", "nom", "prenom", "taille"])
            .values(row![5, "McGuinness", "Paul", Decimal::new(200, 2)])
            .build()?;
        DbSetup::new(&pool, operation).launch().await?;

        let membres = Membre::fetch_all(&pool).await?;
        assert_eq!(membres.len(), 5);
        assert_eq!(membres[4].taille, Some(Decimal::from(2)));
        assert_eq!(membres[0].taille, Some(Decimal::new(175, 2)));

        let table = Table::new(&pool, "membres");
        let snapshot = assert_that(&table).await?;
        snapshot
            .row(4)?
            .value("taille")?
            .is_equal_to(Decimal::new(200, 2))?
            .is_equal_to(2)?;

        println!("✓ taille 2.00 reads back as 2");
        Ok(())
    })
    .await
}
