use std::collections::HashSet;

use foodgram_db::table::{AmountIngredient, Recipe, RecipeTag};
use foodgram_shared::{Error, Result, State};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, prelude::FromRow};
use validator::{Validate, ValidationError};

mod create;
mod delete;
mod update;

pub use create::RecipeInput;
pub use update::RecipeUpdate;

/// Write side of the catalog. Every mutation runs in one transaction on
/// `write_db`.
#[derive(Clone)]
pub struct Command(pub State);

impl Command {
    pub fn new(state: State) -> Self {
        Self(state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct IngredientAmount {
    pub id: i64,
    #[validate(range(min = 1))]
    pub amount: i64,
}

#[derive(FromRow)]
struct Owner {
    author_id: i64,
    image: String,
}

async fn load_owner(conn: &mut SqliteConnection, id: i64) -> Result<Owner> {
    let (sql, values) = Query::select()
        .columns([Recipe::AuthorId, Recipe::Image])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, Owner, _>(&sql, values)
        .fetch_optional(conn)
        .await?
        .ok_or(Error::NotFound("recipe"))
}

/// Replaces the whole tag and ingredient association set of a recipe:
/// every prior row is deleted, then the new set is inserted. Callers run
/// this inside the transaction that writes the recipe row.
pub async fn replace_associations(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    tags: &[i64],
    ingredients: &[IngredientAmount],
) -> Result<()> {
    let (sql, values) = Query::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let (sql, values) = Query::delete()
        .from_table(AmountIngredient::Table)
        .and_where(Expr::col(AmountIngredient::RecipeId).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if !tags.is_empty() {
        let mut statement = Query::insert()
            .into_table(RecipeTag::Table)
            .columns([RecipeTag::RecipeId, RecipeTag::TagId])
            .to_owned();

        for tag in tags {
            statement.values_panic([recipe_id.into(), (*tag).into()]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    if !ingredients.is_empty() {
        let mut statement = Query::insert()
            .into_table(AmountIngredient::Table)
            .columns([
                AmountIngredient::RecipeId,
                AmountIngredient::IngredientId,
                AmountIngredient::Amount,
            ])
            .to_owned();

        for ingredient in ingredients {
            statement.values_panic([
                recipe_id.into(),
                ingredient.id.into(),
                ingredient.amount.into(),
            ]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    Ok(())
}

fn unique_tags(tags: &[i64]) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if tags.iter().all(|id| seen.insert(*id)) {
        return Ok(());
    }

    Err(ValidationError::new("duplicate").with_message("tags must not repeat".into()))
}

fn unique_ingredients(
    ingredients: &[IngredientAmount],
) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if ingredients.iter().all(|i| seen.insert(i.id)) {
        return Ok(());
    }

    Err(ValidationError::new("duplicate").with_message("ingredients must not repeat".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_rejected() {
        assert!(unique_tags(&[1, 2, 3]).is_ok());
        assert!(unique_tags(&[1, 2, 1]).is_err());

        let potato = IngredientAmount { id: 1, amount: 200 };
        assert!(unique_ingredients(&[potato]).is_ok());
        assert!(unique_ingredients(&[potato, IngredientAmount { id: 1, amount: 5 }]).is_err());
    }
}
