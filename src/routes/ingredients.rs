use axum::{
    Json,
    extract::{Path, Query, State},
};
use foodgram_recipe::{IngredientOut, ledger};

use super::tags::NameFilter;
use crate::{error::AppError, server::AppState};

/// GET /api/ingredients/?name= - prefix search on the ingredient name
pub async fn list(
    State(app): State<AppState>,
    Query(filter): Query<NameFilter>,
) -> Result<Json<Vec<IngredientOut>>, AppError> {
    let ingredients = ledger::list_ingredients(&app.db.read_db, filter.name.as_deref()).await?;

    Ok(Json(ingredients))
}

pub async fn detail(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<IngredientOut>, AppError> {
    Ok(Json(ledger::find_ingredient(&app.db.read_db, id).await?))
}
