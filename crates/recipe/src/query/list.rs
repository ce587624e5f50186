use foodgram_shared::{Error, Result, Viewer};
use sea_query::SqliteQueryBuilder;
use sea_query_sqlx::SqlxBinder;
use url::Url;
use validator::Validate;

use crate::{
    RecipeOut,
    annotation,
    filter::{QueryPlan, RecipeFilter},
    pagination::Page,
};

use super::{RecipeRow, relations};

impl super::Query {
    /// One page of filtered, annotated recipes plus the total count of the
    /// filtered set. `url` is the request URL the page links derive from.
    pub async fn list(
        &self,
        filter: &RecipeFilter,
        viewer: &Viewer,
        url: &Url,
    ) -> Result<Page<RecipeOut>> {
        filter.pagination.validate()?;

        let QueryPlan::Select(set) = QueryPlan::new(filter, viewer)? else {
            return Ok(Page::empty());
        };

        let (sql, values) = set.count_statement().build_sqlx(SqliteQueryBuilder);
        let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.state.read_db)
            .await?;

        let count = u64::try_from(count).unwrap_or_default();
        if count == 0 {
            return Ok(Page::empty());
        }

        let pagination = &filter.pagination;
        if pagination.offset() >= count {
            return Ok(Page::new(url, pagination, count, vec![]));
        }

        let (sql, values) = set
            .page_statement(pagination.offset(), pagination.limit)
            .build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.state.read_db)
            .await?;

        let results = self.assemble(rows, viewer).await?;

        Ok(Page::new(url, pagination, count, results))
    }

    /// Attaches nested relations and viewer flags. Each relation is one
    /// query keyed by the whole row set.
    pub(crate) async fn assemble(
        &self,
        rows: Vec<RecipeRow>,
        viewer: &Viewer,
    ) -> Result<Vec<RecipeOut>> {
        let pool = &self.state.read_db;
        let ids = rows.iter().map(|r| r.id).collect::<Vec<_>>();
        let author_ids = rows.iter().map(|r| r.author_id).collect::<Vec<_>>();

        let flags = annotation::annotate(pool, viewer, &ids).await?;
        let mut tags = relations::tags(pool, &ids).await?;
        let mut ingredients = relations::ingredients(pool, &ids).await?;
        let authors = relations::authors(pool, viewer, &author_ids).await?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in rows {
            let author = authors.get(&row.author_id).cloned().ok_or_else(|| {
                Error::Unknown(anyhow::anyhow!(
                    "author {} of recipe {} missing",
                    row.author_id,
                    row.id
                ))
            })?;
            let marks = flags.get(row.id);

            recipes.push(RecipeOut {
                id: row.id,
                image: crate::types::media_url(&self.media_url, &row.image),
                name: row.name,
                author,
                ingredients: ingredients.remove(&row.id).unwrap_or_default(),
                tags: tags.remove(&row.id).unwrap_or_default(),
                text: row.text,
                cooking_time: row.cooking_time,
                is_favorited: marks.is_favorited,
                is_in_shopping_cart: marks.is_in_shopping_cart,
            });
        }

        Ok(recipes)
    }
}
