use foodgram_db::table::Recipe;
use foodgram_shared::{Error, Result};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use super::IngredientAmount;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Media store path of an already stored image.
    #[validate(length(min = 1))]
    pub image: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1))]
    pub cooking_time: i64,
    #[validate(length(min = 1), custom(function = "super::unique_tags"))]
    pub tags: Vec<i64>,
    #[validate(length(min = 1), nested, custom(function = "super::unique_ingredients"))]
    pub ingredients: Vec<IngredientAmount>,
}

impl super::Command {
    pub async fn create(&self, author: i64, input: RecipeInput) -> Result<i64> {
        input.validate()?;

        let now = foodgram_shared::now();
        let mut tx = self.0.write_db.begin().await?;

        let (sql, values) = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Text,
                Recipe::CookingTime,
                Recipe::PubDate,
                Recipe::CreatedAt,
                Recipe::UpdatedAt,
            ])
            .values_panic([
                author.into(),
                input.name.to_owned().into(),
                input.image.to_owned().into(),
                input.text.to_owned().into(),
                input.cooking_time.into(),
                now.into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await
            .map_err(Error::exists_as("recipe"))?
            .last_insert_rowid();

        super::replace_associations(&mut tx, id, &input.tags, &input.ingredients).await?;

        tx.commit().await?;

        tracing::info!(recipe = id, author, "recipe created");

        Ok(id)
    }
}
