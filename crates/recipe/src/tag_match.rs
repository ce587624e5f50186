//! Tag intersection (AND) matching.

use std::collections::BTreeSet;

use foodgram_db::table::{RecipeTag, Tag};
use sea_query::{Expr, ExprTrait, Func, JoinType, Query, SelectStatement};

/// Sub-select of the recipe ids tagged with every slug in `slugs`.
///
/// Returns `None` for an empty set, in which case the caller leaves its
/// candidate set untouched.
pub fn matching_recipes(slugs: &BTreeSet<String>) -> Option<SelectStatement> {
    if slugs.is_empty() {
        return None;
    }

    let statement = Query::select()
        .column((RecipeTag::Table, RecipeTag::RecipeId))
        .from(RecipeTag::Table)
        .join(
            JoinType::InnerJoin,
            Tag::Table,
            Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
        )
        .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(slugs.iter().cloned()))
        .group_by_col((RecipeTag::Table, RecipeTag::RecipeId))
        .and_having(
            Expr::expr(Func::count_distinct(Expr::col((Tag::Table, Tag::Slug))))
                .eq(slugs.len() as i64),
        )
        .to_owned();

    Some(statement)
}

#[cfg(test)]
mod tests {
    use sea_query::SqliteQueryBuilder;

    use super::*;

    #[test]
    fn empty_set_is_a_no_op() {
        assert!(matching_recipes(&BTreeSet::new()).is_none());
    }

    #[test]
    fn requires_every_distinct_slug() {
        let slugs = BTreeSet::from(["breakfast".to_owned(), "vegan".to_owned()]);
        let sql = matching_recipes(&slugs)
            .unwrap()
            .to_string(SqliteQueryBuilder);

        assert!(sql.contains(r#"IN ('breakfast', 'vegan')"#), "{sql}");
        assert!(
            sql.contains(r#"HAVING COUNT(DISTINCT "tag"."slug") = 2"#),
            "{sql}"
        );
    }
}
