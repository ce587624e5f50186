use foodgram_db::table::{AmountIngredient, Cart, Ingredient};
use foodgram_shared::Result;
use sea_query::{Alias, Expr, ExprTrait, Func, JoinType, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

/// One line of the shopping list: total amount of an ingredient identity
/// (name and unit) across every recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Sums ingredient amounts over the cart of `user`, grouped by
/// (name, measurement unit).
pub async fn shopping_list(pool: &SqlitePool, user: i64) -> Result<Vec<ShoppingItem>> {
    let (sql, values) = Query::select()
        .columns([
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::MeasurementUnit),
        ])
        .expr_as(
            Func::sum(Expr::col((AmountIngredient::Table, AmountIngredient::Amount))),
            Alias::new("amount"),
        )
        .from(Cart::Table)
        .join(
            JoinType::InnerJoin,
            AmountIngredient::Table,
            Expr::col((Cart::Table, Cart::RecipeId))
                .equals((AmountIngredient::Table, AmountIngredient::RecipeId)),
        )
        .join(
            JoinType::InnerJoin,
            Ingredient::Table,
            Expr::col((AmountIngredient::Table, AmountIngredient::IngredientId))
                .equals((Ingredient::Table, Ingredient::Id)),
        )
        .and_where(Expr::col((Cart::Table, Cart::UserId)).eq(user))
        .group_by_columns([
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::MeasurementUnit),
        ])
        .order_by((Ingredient::Table, Ingredient::Name), Order::Asc)
        .order_by((Ingredient::Table, Ingredient::MeasurementUnit), Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ShoppingItem, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}
