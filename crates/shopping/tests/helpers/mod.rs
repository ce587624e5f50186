#![allow(dead_code)]

use foodgram_db::table::User;
use foodgram_recipe::{
    Command, IngredientAmount, RecipeInput,
    ledger::{self, NewIngredient, NewTag},
};
use foodgram_shared::State;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::new(pool))
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> anyhow::Result<i64> {
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
            format!("{username}@foodgram.test").into(),
            username.into(),
            username.into(),
            "Doe".into(),
            0i64.into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .execute(pool)
        .await?
        .last_insert_rowid())
}

pub async fn create_tag(pool: &SqlitePool, slug: &str, color: &str) -> anyhow::Result<i64> {
    let tag = ledger::create_tag(
        pool,
        NewTag {
            name: slug.to_uppercase(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        },
    )
    .await?;

    Ok(tag.id)
}

pub async fn create_ingredient(pool: &SqlitePool, name: &str, unit: &str) -> anyhow::Result<i64> {
    let ingredient = ledger::create_ingredient(
        pool,
        NewIngredient {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        },
    )
    .await?;

    Ok(ingredient.id)
}

pub fn recipe(name: &str, tags: Vec<i64>, ingredients: Vec<(i64, i64)>) -> RecipeInput {
    RecipeInput {
        name: name.to_owned(),
        image: format!("recipes/images/{}.png", name.to_lowercase()),
        text: format!("How to cook {name}"),
        cooking_time: 10,
        tags,
        ingredients: ingredients
            .into_iter()
            .map(|(id, amount)| IngredientAmount { id, amount })
            .collect(),
    }
}

/// Catalog with a breakfast and a vegan tag and one ingredient.
pub struct Catalog {
    pub state: State,
    pub cmd: Command,
    pub author: i64,
    pub breakfast: i64,
    pub vegan: i64,
    pub potato: i64,
}

pub async fn catalog(path: PathBuf) -> anyhow::Result<Catalog> {
    let state = setup_test_state(path).await?;
    let author = create_user(&state.write_db, "john").await?;
    let breakfast = create_tag(&state.write_db, "breakfast", "E26C2D").await?;
    let vegan = create_tag(&state.write_db, "vegan", "#49B64E").await?;
    let potato = create_ingredient(&state.write_db, "potato", "g").await?;

    Ok(Catalog {
        cmd: Command::new(state.clone()),
        state,
        author,
        breakfast,
        vegan,
        potato,
    })
}
