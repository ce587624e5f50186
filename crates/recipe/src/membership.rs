//! Favorite and shopping-cart markers: existence-only (user, recipe) pairs.

use foodgram_db::table::{Cart, Favorite, Recipe};
use foodgram_shared::{Error, Result};
use sea_query::{Expr, ExprTrait, IntoIden, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Favorite,
    Cart,
}

impl Membership {
    fn kind(&self) -> &'static str {
        match self {
            Membership::Favorite => "favorite",
            Membership::Cart => "shopping cart entry",
        }
    }

    fn columns(&self) -> (sea_query::DynIden, [sea_query::DynIden; 3]) {
        match self {
            Membership::Favorite => (
                Favorite::Table.into_iden(),
                [
                    Favorite::UserId.into_iden(),
                    Favorite::RecipeId.into_iden(),
                    Favorite::CreatedAt.into_iden(),
                ],
            ),
            Membership::Cart => (
                Cart::Table.into_iden(),
                [
                    Cart::UserId.into_iden(),
                    Cart::RecipeId.into_iden(),
                    Cart::CreatedAt.into_iden(),
                ],
            ),
        }
    }
}

impl Command {
    /// Marks `recipe` for `user`. A pair that already exists is reported as
    /// `AlreadyExists` and left untouched.
    pub async fn add(&self, membership: Membership, user: i64, recipe: i64) -> Result<()> {
        let mut tx = self.0.write_db.begin().await?;

        let (sql, values) = Query::select()
            .column(Recipe::Id)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(recipe))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(Error::NotFound("recipe"))?;

        let (table, [user_col, recipe_col, created_at]) = membership.columns();
        let (sql, values) = Query::insert()
            .into_table(table)
            .columns([user_col, recipe_col, created_at])
            .values_panic([user.into(), recipe.into(), foodgram_shared::now().into()])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await
            .map_err(Error::exists_as(membership.kind()))?;

        tx.commit().await?;

        tracing::info!(user, recipe, kind = membership.kind(), "membership added");

        Ok(())
    }

    /// Removing an absent pair is not an error.
    pub async fn remove(&self, membership: Membership, user: i64, recipe: i64) -> Result<()> {
        let (table, [user_col, recipe_col, _]) = membership.columns();
        let (sql, values) = Query::delete()
            .from_table(table)
            .and_where(Expr::col(user_col).eq(user))
            .and_where(Expr::col(recipe_col).eq(recipe))
            .build_sqlx(SqliteQueryBuilder);

        let removed = sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?
            .rows_affected();

        tracing::debug!(user, recipe, kind = membership.kind(), removed, "membership removed");

        Ok(())
    }
}
