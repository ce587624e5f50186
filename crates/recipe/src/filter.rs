//! Declarative listing filter and the pure mapping to a query plan.

use std::collections::BTreeSet;

use foodgram_db::table::{Cart, Favorite, Recipe};
use foodgram_shared::{Error, Result, Viewer};
use sea_query::{Expr, ExprTrait, Func, Order, Query, SelectStatement};

use crate::{pagination::Pagination, tag_match};

/// What the caller asked for. `tags: Some(empty)` means the parameter was
/// supplied without any slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<i64>,
    pub tags: Option<BTreeSet<String>>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub pagination: Pagination,
}

impl RecipeFilter {
    fn viewer_only(&self) -> bool {
        self.is_favorited || self.is_in_shopping_cart
    }
}

#[derive(Debug, Clone)]
pub enum QueryPlan {
    /// Nothing can match; no statement needs to run.
    Empty,
    Select(RecipeSet),
}

/// Filtered, unpaginated set of recipes.
#[derive(Debug, Clone)]
pub struct RecipeSet(SelectStatement);

impl QueryPlan {
    pub fn new(filter: &RecipeFilter, viewer: &Viewer) -> Result<Self> {
        let viewer_id = match (filter.viewer_only(), viewer.id()) {
            (true, None) => return Err(Error::InvalidFilterCombination),
            (_, id) => id,
        };

        if filter.viewer_only() && filter.tags.as_ref().is_some_and(BTreeSet::is_empty) {
            return Ok(QueryPlan::Empty);
        }

        let mut statement = Query::select().from(Recipe::Table).to_owned();

        if let Some(author) = filter.author {
            statement.and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author));
        }

        if let Some(matching) = filter.tags.as_ref().and_then(tag_match::matching_recipes) {
            statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(matching));
        }

        if let Some(user) = viewer_id.filter(|_| filter.is_favorited) {
            statement.and_where(
                Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                    Query::select()
                        .column(Favorite::RecipeId)
                        .from(Favorite::Table)
                        .and_where(Expr::col(Favorite::UserId).eq(user))
                        .to_owned(),
                ),
            );
        }

        if let Some(user) = viewer_id.filter(|_| filter.is_in_shopping_cart) {
            statement.and_where(
                Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                    Query::select()
                        .column(Cart::RecipeId)
                        .from(Cart::Table)
                        .and_where(Expr::col(Cart::UserId).eq(user))
                        .to_owned(),
                ),
            );
        }

        Ok(QueryPlan::Select(RecipeSet(statement)))
    }
}

impl RecipeSet {
    pub fn count_statement(&self) -> SelectStatement {
        self.0
            .clone()
            .expr(Func::count(Expr::col((Recipe::Table, Recipe::Id))))
            .to_owned()
    }

    /// Page rows, newest publication first, then newest creation first.
    /// SQLite binds integers as `i64`, so both bounds are clamped to it.
    pub fn page_statement(&self, offset: u64, limit: u64) -> SelectStatement {
        let max = i64::MAX as u64;
        let (offset, limit) = (Ord::min(offset, max), Ord::min(limit, max));

        self.0
            .clone()
            .columns(crate::query::RECIPE_COLUMNS.map(|c| (Recipe::Table, c)))
            .order_by((Recipe::Table, Recipe::PubDate), Order::Desc)
            .order_by((Recipe::Table, Recipe::Id), Order::Desc)
            .offset(offset)
            .limit(limit)
            .to_owned()
    }
}
