mod detail;
mod list;
mod relations;
mod subscriptions;

use foodgram_db::table::Recipe;
use foodgram_shared::State;
use sqlx::prelude::FromRow;

pub use subscriptions::{DEFAULT_RECIPES_LIMIT, RecipesLimit};

pub(crate) const RECIPE_COLUMNS: [Recipe; 6] = [
    Recipe::Id,
    Recipe::AuthorId,
    Recipe::Name,
    Recipe::Image,
    Recipe::Text,
    Recipe::CookingTime,
];

#[derive(Debug, FromRow)]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

/// Read side of the catalog.
#[derive(Clone)]
pub struct Query {
    pub state: State,
    pub media_url: String,
}

impl Query {
    pub fn new(state: State, media_url: impl Into<String>) -> Self {
        Self {
            state,
            media_url: media_url.into(),
        }
    }
}
