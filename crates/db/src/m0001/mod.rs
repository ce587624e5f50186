mod amount_ingredient;
mod cart;
mod favorite;
mod ingredient;
mod recipe;
mod recipe_tag;
mod subscription;
mod tag;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

/// Implements `sqlx_migrator::Operation` for a unit struct from a pair of
/// sea-query statement builders.
macro_rules! operation {
    ($name:ident, $up:expr, $down:expr) => {
        pub struct $name;

        #[async_trait::async_trait]
        impl sqlx_migrator::Operation<sqlx::Sqlite> for $name {
            async fn up(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $up.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }

            async fn down(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $down.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }
        }
    };
}

pub(crate) use operation;

sqlx_migrator::sqlite_migration!(
    Migration,
    "foodgram",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        subscription::CreateTable,
        subscription::CreateUk1,
        tag::CreateTable,
        ingredient::CreateTable,
        ingredient::CreateUk1,
        ingredient::CreateIdx1,
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
        recipe_tag::CreateTable,
        recipe_tag::CreateUk1,
        recipe_tag::CreateIdx1,
        amount_ingredient::CreateTable,
        amount_ingredient::CreateUk1,
        favorite::CreateTable,
        favorite::CreateUk1,
        cart::CreateTable,
        cart::CreateUk1
    ]
);
