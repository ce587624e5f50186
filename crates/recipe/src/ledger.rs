//! Canonical tag and ingredient rows.

use std::sync::LazyLock;

use foodgram_db::table::{Ingredient, Tag};
use foodgram_shared::{Error, Result};
use regex::Regex;
use sea_query::{Expr, ExprTrait, LikeExpr, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{IngredientOut, TagOut};

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug pattern"));
static COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9a-fA-F]{6}$").expect("valid color pattern"));

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTag {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(regex(path = *COLOR))]
    pub color: String,
    #[validate(length(min = 1, max = 200), regex(path = *SLUG))]
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewIngredient {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub measurement_unit: String,
}

pub async fn find_tag(pool: &SqlitePool, id: i64) -> Result<TagOut> {
    let (sql, values) = Query::select()
        .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
        .from(Tag::Table)
        .and_where(Expr::col(Tag::Id).eq(id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, TagOut, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound("tag"))
}

pub async fn list_tags(pool: &SqlitePool, name: Option<&str>) -> Result<Vec<TagOut>> {
    let mut statement = Query::select()
        .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
        .from(Tag::Table)
        .order_by(Tag::Id, Order::Asc)
        .to_owned();

    if let Some(name) = name.filter(|n| !n.is_empty()) {
        statement.and_where(Expr::col(Tag::Name).like(name_prefix(name)));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, TagOut, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub async fn create_tag(pool: &SqlitePool, input: NewTag) -> Result<TagOut> {
    input.validate()?;

    let color = input.color.trim_start_matches('#').to_uppercase();
    let (sql, values) = Query::insert()
        .into_table(Tag::Table)
        .columns([Tag::Name, Tag::Color, Tag::Slug])
        .values_panic([
            input.name.to_owned().into(),
            color.to_owned().into(),
            input.slug.to_owned().into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    let id = sqlx::query_with(&sql, values)
        .execute(pool)
        .await
        .map_err(Error::exists_as("tag"))?
        .last_insert_rowid();

    Ok(TagOut {
        id,
        name: input.name,
        color,
        slug: input.slug,
    })
}

pub async fn find_ingredient(pool: &SqlitePool, id: i64) -> Result<IngredientOut> {
    let (sql, values) = Query::select()
        .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).eq(id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, IngredientOut, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound("ingredient"))
}

/// Ingredients whose name starts with `name`, ordered by name.
pub async fn list_ingredients(pool: &SqlitePool, name: Option<&str>) -> Result<Vec<IngredientOut>> {
    let mut statement = Query::select()
        .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
        .from(Ingredient::Table)
        .order_by(Ingredient::Name, Order::Asc)
        .order_by(Ingredient::Id, Order::Asc)
        .to_owned();

    if let Some(name) = name.filter(|n| !n.is_empty()) {
        statement.and_where(Expr::col(Ingredient::Name).like(name_prefix(name)));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientOut, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub async fn create_ingredient(pool: &SqlitePool, input: NewIngredient) -> Result<IngredientOut> {
    input.validate()?;

    let (sql, values) = Query::insert()
        .into_table(Ingredient::Table)
        .columns([Ingredient::Name, Ingredient::MeasurementUnit])
        .values_panic([
            input.name.to_owned().into(),
            input.measurement_unit.to_owned().into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    let id = sqlx::query_with(&sql, values)
        .execute(pool)
        .await
        .map_err(Error::exists_as("ingredient"))?
        .last_insert_rowid();

    Ok(IngredientOut {
        id,
        name: input.name,
        measurement_unit: input.measurement_unit,
    })
}

/// Bulk import; rows whose (name, unit) pair already exists are skipped.
/// Returns how many rows were inserted.
pub async fn load_ingredients(pool: &SqlitePool, inputs: Vec<NewIngredient>) -> Result<u64> {
    for input in inputs.iter() {
        input.validate()?;
    }

    if inputs.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for chunk in inputs.chunks(200) {
        let mut statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([Ingredient::Name, Ingredient::MeasurementUnit])
            .on_conflict(
                OnConflict::columns([Ingredient::Name, Ingredient::MeasurementUnit])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        for input in chunk {
            statement.values_panic([
                input.name.to_owned().into(),
                input.measurement_unit.to_owned().into(),
            ]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        inserted += sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    tx.commit().await?;

    tracing::info!(inserted, total = inputs.len(), "ingredients loaded");

    Ok(inserted)
}

/// `LIKE` pattern matching names that start with `prefix` literally.
fn name_prefix(prefix: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape('\\')
}
