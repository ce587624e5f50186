//! Batched loaders for the nested parts of a recipe.

use std::collections::{HashMap, HashSet};

use foodgram_db::table::{AmountIngredient, Ingredient, RecipeTag, Subscription, Tag, User};
use foodgram_shared::{Result, Viewer};
use sea_query::{Expr, ExprTrait, JoinType, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::{AmountOut, AuthorOut, TagOut};

#[derive(FromRow)]
struct TagRow {
    recipe_id: i64,
    #[sqlx(flatten)]
    tag: TagOut,
}

#[derive(FromRow)]
struct AmountRow {
    recipe_id: i64,
    id: i64,
    name: String,
    measurement_unit: String,
    amount: i64,
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
}

pub(super) async fn tags(pool: &SqlitePool, ids: &[i64]) -> Result<HashMap<i64, Vec<TagOut>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let (sql, values) = Query::select()
        .column((RecipeTag::Table, RecipeTag::RecipeId))
        .columns([
            (Tag::Table, Tag::Id),
            (Tag::Table, Tag::Name),
            (Tag::Table, Tag::Color),
            (Tag::Table, Tag::Slug),
        ])
        .from(RecipeTag::Table)
        .join(
            JoinType::InnerJoin,
            Tag::Table,
            Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
        )
        .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(ids.iter().copied()))
        .order_by((Tag::Table, Tag::Id), Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, TagRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut tags = HashMap::<i64, Vec<TagOut>>::new();
    for row in rows {
        tags.entry(row.recipe_id).or_default().push(row.tag);
    }

    Ok(tags)
}

pub(super) async fn ingredients(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<AmountOut>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let (sql, values) = Query::select()
        .columns([
            (AmountIngredient::Table, AmountIngredient::RecipeId),
            (AmountIngredient::Table, AmountIngredient::Amount),
        ])
        .columns([
            (Ingredient::Table, Ingredient::Id),
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::MeasurementUnit),
        ])
        .from(AmountIngredient::Table)
        .join(
            JoinType::InnerJoin,
            Ingredient::Table,
            Expr::col((AmountIngredient::Table, AmountIngredient::IngredientId))
                .equals((Ingredient::Table, Ingredient::Id)),
        )
        .and_where(
            Expr::col((AmountIngredient::Table, AmountIngredient::RecipeId))
                .is_in(ids.iter().copied()),
        )
        .order_by((AmountIngredient::Table, AmountIngredient::Id), Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, AmountRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut amounts = HashMap::<i64, Vec<AmountOut>>::new();
    for row in rows {
        amounts.entry(row.recipe_id).or_default().push(AmountOut {
            id: row.id,
            name: row.name,
            measurement_unit: row.measurement_unit,
            amount: row.amount,
        });
    }

    Ok(amounts)
}

/// Author summaries keyed by user id, `is_subscribed` relative to `viewer`.
pub(super) async fn authors(
    pool: &SqlitePool,
    viewer: &Viewer,
    ids: &[i64],
) -> Result<HashMap<i64, AuthorOut>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let (sql, values) = Query::select()
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
        ])
        .from(User::Table)
        .and_where(Expr::col(User::Id).is_in(ids.iter().copied()))
        .build_sqlx(SqliteQueryBuilder);

    let users = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let subscribed = match viewer.id() {
        Some(user) => {
            let (sql, values) = Query::select()
                .column(Subscription::AuthorId)
                .from(Subscription::Table)
                .and_where(Expr::col(Subscription::UserId).eq(user))
                .and_where(Expr::col(Subscription::AuthorId).is_in(ids.iter().copied()))
                .build_sqlx(SqliteQueryBuilder);

            sqlx::query_scalar_with::<_, i64, _>(&sql, values)
                .fetch_all(pool)
                .await?
                .into_iter()
                .collect::<HashSet<_>>()
        }
        None => HashSet::new(),
    };

    Ok(users
        .into_iter()
        .map(|u| {
            let author = AuthorOut {
                id: u.id,
                is_subscribed: subscribed.contains(&u.id),
                email: u.email,
                username: u.username,
                first_name: u.first_name,
                last_name: u.last_name,
            };
            (u.id, author)
        })
        .collect())
}
