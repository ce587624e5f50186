use foodgram_db::table::Recipe;
use foodgram_shared::{Error, Result, Viewer};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{RecipeOut, RecipeShort, types::media_url};

use super::{RECIPE_COLUMNS, RecipeRow};

impl super::Query {
    pub async fn find(&self, id: i64, viewer: &Viewer) -> Result<RecipeOut> {
        let (sql, values) = sea_query::Query::select()
            .columns(RECIPE_COLUMNS)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.state.read_db)
            .await?
            .ok_or(Error::NotFound("recipe"))?;

        self.assemble(vec![row], viewer)
            .await?
            .pop()
            .ok_or(Error::NotFound("recipe"))
    }

    pub async fn find_short(&self, id: i64) -> Result<RecipeShort> {
        let (sql, values) = sea_query::Query::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let mut recipe = sqlx::query_as_with::<_, RecipeShort, _>(&sql, values)
            .fetch_optional(&self.state.read_db)
            .await?
            .ok_or(Error::NotFound("recipe"))?;

        recipe.image = media_url(&self.media_url, &recipe.image);

        Ok(recipe)
    }
}
