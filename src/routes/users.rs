use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use foodgram_recipe::{
    DEFAULT_RECIPES_LIMIT, Page, Pagination, RecipesLimit, SubscriptionOut,
    pagination::DEFAULT_PAGE_SIZE,
};
use foodgram_shared::Error;
use serde::Deserialize;
use validator::Validate;

use crate::{auth::RequireUser, error::AppError, server::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub recipes_limit: Option<u64>,
}

impl SubscriptionParams {
    fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    fn recipes_limit(&self) -> RecipesLimit {
        RecipesLimit {
            recipes_limit: self.recipes_limit.unwrap_or(DEFAULT_RECIPES_LIMIT),
        }
    }
}

/// GET /api/users/subscriptions/ - authors the caller follows
pub async fn subscriptions(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<SubscriptionParams>, QueryRejection>,
) -> Result<Json<Page<SubscriptionOut>>, AppError> {
    let Query(params) = params?;
    let url = app.request_url(&uri);

    Ok(Json(
        app.query
            .subscriptions(user, &params.pagination(), &params.recipes_limit(), &url)
            .await?,
    ))
}

pub async fn subscribe(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(author): Path<i64>,
    params: Result<Query<SubscriptionParams>, QueryRejection>,
) -> Result<(StatusCode, Json<SubscriptionOut>), AppError> {
    let Query(params) = params?;
    let limit = params.recipes_limit();
    limit.validate().map_err(Error::from)?;

    app.command.subscribe(user, author).await?;
    let entry = app.query.subscription(user, author, &limit).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn unsubscribe(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(author): Path<i64>,
) -> Result<StatusCode, AppError> {
    app.command.unsubscribe(user, author).await?;

    Ok(StatusCode::NO_CONTENT)
}
