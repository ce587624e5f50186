//! Local user rows. Accounts are owned by the identity provider; this only
//! records the profile the catalog displays next to a recipe.

use foodgram_db::table::User;
use foodgram_shared::{Error, Result};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(max = 150))]
    pub first_name: String,
    #[validate(length(max = 150))]
    pub last_name: String,
}

pub async fn create_user(pool: &SqlitePool, input: NewUser) -> Result<i64> {
    input.validate()?;

    let (sql, values) = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::CreatedAt,
        ])
        .values_panic([
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            foodgram_shared::now().into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    let id = sqlx::query_with(&sql, values)
        .execute(pool)
        .await
        .map_err(Error::exists_as("user"))?
        .last_insert_rowid();

    tracing::info!(user = id, "user created");

    Ok(id)
}
