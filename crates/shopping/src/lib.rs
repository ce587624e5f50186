//! Shopping list built from a user's cart.

mod aggregator;
mod render;

pub use aggregator::{ShoppingItem, shopping_list};
pub use render::render;

use foodgram_shared::Result;
use sqlx::SqlitePool;

/// Aggregated shopping list of `user` as downloadable text.
pub async fn export(pool: &SqlitePool, user: i64) -> Result<String> {
    let items = shopping_list(pool, user).await?;
    let text = render(&items)?;

    tracing::info!(user, lines = items.len(), "shopping list exported");

    Ok(text)
}
