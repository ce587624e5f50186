use foodgram_db::table::Recipe;
use foodgram_shared::{Error, Result};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use super::IngredientAmount;

/// Scalar fields are optional; the tag and ingredient sets are always
/// written as a whole.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(range(min = 1))]
    pub cooking_time: Option<i64>,
    #[validate(length(min = 1), custom(function = "super::unique_tags"))]
    pub tags: Vec<i64>,
    #[validate(length(min = 1), nested, custom(function = "super::unique_ingredients"))]
    pub ingredients: Vec<IngredientAmount>,
}

impl super::Command {
    /// Returns the superseded image path when the image was replaced.
    pub async fn update(&self, id: i64, editor: i64, input: RecipeUpdate) -> Result<Option<String>> {
        input.validate()?;

        let mut tx = self.0.write_db.begin().await?;
        let owner = super::load_owner(&mut tx, id).await?;

        if owner.author_id != editor {
            return Err(Error::Forbidden);
        }

        let mut statement = Query::update()
            .table(Recipe::Table)
            .value(Recipe::UpdatedAt, foodgram_shared::now())
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        if let Some(name) = input.name {
            statement.value(Recipe::Name, name);
        }

        if let Some(text) = input.text {
            statement.value(Recipe::Text, text);
        }

        if let Some(cooking_time) = input.cooking_time {
            statement.value(Recipe::CookingTime, cooking_time);
        }

        let previous_image = match input.image {
            Some(image) if image != owner.image => {
                statement.value(Recipe::Image, image);
                Some(owner.image)
            }
            _ => None,
        };

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await
            .map_err(Error::exists_as("recipe"))?;

        super::replace_associations(&mut tx, id, &input.tags, &input.ingredients).await?;

        tx.commit().await?;

        tracing::info!(recipe = id, editor, "recipe updated");

        Ok(previous_image)
    }
}
