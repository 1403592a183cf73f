use anyhow::Result;
use table_fixtures::fixtures::tables::{Membre, MembresTable};
use table_fixtures::{assert_that, init_tracing, DbConfig, Table, TestDatabase};

fn main() -> Result<()> {
    // A current-thread runtime is enough: one connection, one statement at a time
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    init_tracing();

    let config = DbConfig::from_env()?;
    println!("Loading membres fixture into {}...", config.database_url);

    let db = TestDatabase::connect(&config).await?;
    println!("✓ Connected, schema created");

    db.load::<MembresTable>().await?;
    println!("✓ Fixture loaded");

    let table = Table::new(db.pool(), "membres");
    assert_that(&table).await?.has_number_of_rows(4)?;
    println!("✓ membres holds 4 rows");

    let membres = Membre::fetch_all(db.pool()).await?;
    println!("{}", serde_json::to_string_pretty(&membres)?);

    db.close().await;
    Ok(())
}
