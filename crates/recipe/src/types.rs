use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TagOut {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct IngredientOut {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountOut {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorOut {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeOut {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub author: AuthorOut,
    pub ingredients: Vec<AmountOut>,
    pub tags: Vec<TagOut>,
    pub text: String,
    pub cooking_time: i64,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Compact representation returned when a recipe is added to favorites or
/// to the shopping cart.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeShort {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

/// Followed author with a preview of its newest recipes.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionOut {
    #[serde(flatten)]
    pub author: AuthorOut,
    pub recipes: Vec<RecipeShort>,
    pub recipes_count: u64,
}

/// Turns a stored media path into a public URL.
pub(crate) fn media_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
