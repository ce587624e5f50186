use axum::{
    Json,
    extract::{Path, Query, State},
};
use foodgram_recipe::{TagOut, ledger};
use serde::Deserialize;

use crate::{error::AppError, server::AppState};

#[derive(Deserialize)]
pub struct NameFilter {
    pub name: Option<String>,
}

pub async fn list(
    State(app): State<AppState>,
    Query(filter): Query<NameFilter>,
) -> Result<Json<Vec<TagOut>>, AppError> {
    let tags = ledger::list_tags(&app.db.read_db, filter.name.as_deref()).await?;

    Ok(Json(tags))
}

pub async fn detail(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TagOut>, AppError> {
    Ok(Json(ledger::find_tag(&app.db.read_db, id).await?))
}
