//! Viewer-relative flags for a page of recipes.

use std::collections::HashMap;

use foodgram_db::table::{Cart, Favorite};
use foodgram_shared::{Result, Viewer};
use sea_query::{Alias, Expr, ExprTrait, Query, SqliteQueryBuilder, UnionType};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

#[derive(Debug, Default)]
pub struct Annotations(HashMap<i64, Flags>);

const FAVORITE: &str = "favorite";
const CART: &str = "cart";

impl Annotations {
    pub fn get(&self, recipe_id: i64) -> Flags {
        self.0.get(&recipe_id).copied().unwrap_or_default()
    }
}

/// Computes flags for `ids` in a single round trip. Anonymous viewers get
/// all-false flags without touching the database.
pub async fn annotate(pool: &SqlitePool, viewer: &Viewer, ids: &[i64]) -> Result<Annotations> {
    let Some(user) = viewer.id() else {
        return Ok(Annotations::default());
    };

    if ids.is_empty() {
        return Ok(Annotations::default());
    }

    let cart = Query::select()
        .column(Cart::RecipeId)
        .expr_as(Expr::val(CART), Alias::new("kind"))
        .from(Cart::Table)
        .and_where(Expr::col(Cart::UserId).eq(user))
        .and_where(Expr::col(Cart::RecipeId).is_in(ids.iter().copied()))
        .to_owned();

    let (sql, values) = Query::select()
        .column(Favorite::RecipeId)
        .expr_as(Expr::val(FAVORITE), Alias::new("kind"))
        .from(Favorite::Table)
        .and_where(Expr::col(Favorite::UserId).eq(user))
        .and_where(Expr::col(Favorite::RecipeId).is_in(ids.iter().copied()))
        .union(UnionType::All, cart)
        .build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, (i64, String), _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut flags = HashMap::<i64, Flags>::new();
    for (recipe_id, kind) in rows {
        let entry = flags.entry(recipe_id).or_default();
        match kind.as_str() {
            FAVORITE => entry.is_favorited = true,
            CART => entry.is_in_shopping_cart = true,
            other => tracing::warn!(recipe_id, kind = other, "unknown annotation kind"),
        }
    }

    Ok(Annotations(flags))
}
