//! Database migration utilities

use sqlx::{Sqlite, migrate::MigrateDatabase};
use sqlx_migrator::{Migrate, Plan};

/// Create the database if missing and apply every pending migration
pub async fn migrate(database_url: &str) -> anyhow::Result<()> {
    if !Sqlite::database_exists(database_url).await? {
        tracing::info!("Database does not exist, creating: {}", database_url);
        Sqlite::create_database(database_url).await?;
    }

    let pool = crate::db::create_pool(database_url, 1).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator::<Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Drop the database if it exists, then migrate from scratch
pub async fn reset(database_url: &str) -> anyhow::Result<()> {
    if Sqlite::database_exists(database_url).await? {
        tracing::warn!("Dropping existing database: {}", database_url);
        Sqlite::drop_database(database_url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate(database_url).await
}
