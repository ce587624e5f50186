use std::collections::HashMap;

use foodgram_db::table::{Recipe, Subscription, User};
use foodgram_shared::{Error, Result, Viewer};
use sea_query::{Expr, ExprTrait, Func, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::prelude::FromRow;
use url::Url;
use validator::Validate;

use crate::{
    RecipeShort, SubscriptionOut,
    pagination::{MAX_PAGE_SIZE, Page, Pagination},
    types::media_url,
};

use super::relations;

pub const DEFAULT_RECIPES_LIMIT: u64 = 3;

fn default_recipes_limit() -> u64 {
    DEFAULT_RECIPES_LIMIT
}

/// How many of each followed author's recipes to embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct RecipesLimit {
    #[serde(default = "default_recipes_limit")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub recipes_limit: u64,
}

impl Default for RecipesLimit {
    fn default() -> Self {
        Self {
            recipes_limit: DEFAULT_RECIPES_LIMIT,
        }
    }
}

#[derive(FromRow)]
struct AuthoredRecipe {
    author_id: i64,
    #[sqlx(flatten)]
    recipe: RecipeShort,
}

impl super::Query {
    /// Authors `user` follows, ordered by username, each with its newest
    /// recipes and the total number of recipes it has published.
    pub async fn subscriptions(
        &self,
        user: i64,
        pagination: &Pagination,
        limit: &RecipesLimit,
        url: &Url,
    ) -> Result<Page<SubscriptionOut>> {
        pagination.validate()?;
        limit.validate()?;

        let (sql, values) = sea_query::Query::select()
            .expr(Func::count(Expr::col(Subscription::AuthorId)))
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user))
            .build_sqlx(SqliteQueryBuilder);

        let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.state.read_db)
            .await?;

        let count = u64::try_from(count).unwrap_or_default();
        if count == 0 {
            return Ok(Page::empty());
        }

        if pagination.offset() >= count {
            return Ok(Page::new(url, pagination, count, vec![]));
        }

        let max = i64::MAX as u64;
        let (sql, values) = sea_query::Query::select()
            .column((User::Table, User::Id))
            .from(Subscription::Table)
            .join(
                JoinType::InnerJoin,
                User::Table,
                Expr::col((Subscription::Table, Subscription::AuthorId))
                    .equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((Subscription::Table, Subscription::UserId)).eq(user))
            .order_by((User::Table, User::Username), Order::Asc)
            .order_by((User::Table, User::Id), Order::Asc)
            .offset(Ord::min(pagination.offset(), max))
            .limit(Ord::min(pagination.limit, max))
            .build_sqlx(SqliteQueryBuilder);

        let authors = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_all(&self.state.read_db)
            .await?;

        let results = self.followed(user, &authors, limit.recipes_limit).await?;

        Ok(Page::new(url, pagination, count, results))
    }

    /// One followed author in the listing representation.
    pub async fn subscription(
        &self,
        user: i64,
        author: i64,
        limit: &RecipesLimit,
    ) -> Result<SubscriptionOut> {
        limit.validate()?;

        self.followed(user, &[author], limit.recipes_limit)
            .await?
            .pop()
            .ok_or(Error::NotFound("user"))
    }

    async fn followed(
        &self,
        user: i64,
        authors: &[i64],
        recipes_limit: u64,
    ) -> Result<Vec<SubscriptionOut>> {
        if authors.is_empty() {
            return Ok(vec![]);
        }

        let pool = &self.state.read_db;
        let mut summaries = relations::authors(pool, &Viewer::User(user), authors).await?;

        let (sql, values) = sea_query::Query::select()
            .columns([
                Recipe::AuthorId,
                Recipe::Id,
                Recipe::Name,
                Recipe::Image,
                Recipe::CookingTime,
            ])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).is_in(authors.iter().copied()))
            .order_by(Recipe::PubDate, Order::Desc)
            .order_by(Recipe::Id, Order::Desc)
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, AuthoredRecipe, _>(&sql, values)
            .fetch_all(pool)
            .await?;

        let keep = usize::try_from(recipes_limit).unwrap_or(usize::MAX);
        let mut recipes = HashMap::<i64, (Vec<RecipeShort>, u64)>::new();
        for row in rows {
            let (shown, total) = recipes.entry(row.author_id).or_default();
            *total += 1;
            if shown.len() < keep {
                let mut recipe = row.recipe;
                recipe.image = media_url(&self.media_url, &recipe.image);
                shown.push(recipe);
            }
        }

        let mut followed = Vec::with_capacity(authors.len());
        for id in authors {
            let Some(author) = summaries.remove(id) else {
                continue;
            };
            let (recipes, recipes_count) = recipes.remove(id).unwrap_or_default();

            followed.push(SubscriptionOut {
                author,
                recipes,
                recipes_count,
            });
        }

        Ok(followed)
    }
}
