use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{OriginalUri, Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::{Query, QueryRejection};
use foodgram_recipe::{
    Membership, Page, Pagination, RecipeFilter, RecipeInput, RecipeOut, RecipeShort, RecipeUpdate,
    pagination::DEFAULT_PAGE_SIZE,
};
use foodgram_shared::Viewer;
use serde::{Deserialize, Deserializer, de::Error as _};

use crate::{
    auth::{CurrentViewer, RequireUser},
    error::AppError,
    server::AppState,
};

/// Listing parameters; `tags` may repeat.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub author: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_favorited: bool,
    #[serde(default, deserialize_with = "flag")]
    pub is_in_shopping_cart: bool,
}

impl From<ListParams> for RecipeFilter {
    fn from(params: ListParams) -> Self {
        // `?tags=` without a value still counts as a supplied tag list.
        let tags = (!params.tags.is_empty()).then(|| {
            params
                .tags
                .into_iter()
                .filter(|slug| !slug.is_empty())
                .collect::<BTreeSet<_>>()
        });

        RecipeFilter {
            author: params.author,
            tags,
            is_favorited: params.is_favorited,
            is_in_shopping_cart: params.is_in_shopping_cart,
            pagination: Pagination::new(
                params.page.unwrap_or(1),
                params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            ),
        }
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(other) => Err(D::Error::custom(format!("invalid boolean `{other}`"))),
    }
}

pub async fn list(
    State(app): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<RecipeOut>>, AppError> {
    let Query(params) = params?;
    let filter = RecipeFilter::from(params);
    let url = app.request_url(&uri);

    Ok(Json(app.query.list(&filter, &viewer, &url).await?))
}

pub async fn detail(
    State(app): State<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<i64>,
) -> Result<Json<RecipeOut>, AppError> {
    Ok(Json(app.query.find(id, &viewer).await?))
}

pub async fn create(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    input: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeOut>), AppError> {
    let Json(input) = input?;
    let id = app.command.create(user, input).await?;
    let recipe = app.query.find(id, &Viewer::User(user)).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
    input: Result<Json<RecipeUpdate>, JsonRejection>,
) -> Result<Json<RecipeOut>, AppError> {
    let Json(input) = input?;
    if let Some(previous) = app.command.update(id, user, input).await? {
        tracing::info!(recipe = id, image = %previous, "image superseded");
    }

    Ok(Json(app.query.find(id, &Viewer::User(user)).await?))
}

pub async fn delete(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let image = app.command.delete(id, user).await?;
    tracing::info!(recipe = id, image = %image, "image released");

    Ok(StatusCode::NO_CONTENT)
}

async fn add(
    app: AppState,
    membership: Membership,
    user: i64,
    id: i64,
) -> Result<(StatusCode, Json<RecipeShort>), AppError> {
    app.command.add(membership, user, id).await?;

    Ok((StatusCode::CREATED, Json(app.query.find_short(id).await?)))
}

async fn remove(
    app: AppState,
    membership: Membership,
    user: i64,
    id: i64,
) -> Result<StatusCode, AppError> {
    app.command.remove(membership, user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeShort>), AppError> {
    add(app, Membership::Favorite, user, id).await
}

pub async fn remove_favorite(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    remove(app, Membership::Favorite, user, id).await
}

pub async fn add_to_cart(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeShort>), AppError> {
    add(app, Membership::Cart, user, id).await
}

pub async fn remove_from_cart(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    remove(app, Membership::Cart, user, id).await
}

/// GET /api/recipes/download_shopping_cart/ - aggregated cart as text
pub async fn download_shopping_cart(
    State(app): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    let text = foodgram_shopping::export(&app.db.read_db, user).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> RecipeFilter {
        let Query(params) = Query::<ListParams>::try_from_uri(
            &format!("http://localhost/api/recipes/?{query}").parse().unwrap(),
        )
        .unwrap();
        params.into()
    }

    #[test]
    fn test_repeated_tags() {
        let filter = parse("tags=vegan&tags=breakfast&page=2&limit=3&is_favorited=1");
        assert_eq!(
            filter.tags,
            Some(BTreeSet::from(["breakfast".to_owned(), "vegan".to_owned()]))
        );
        assert_eq!(filter.pagination, Pagination::new(2, 3));
        assert!(filter.is_favorited);
        assert!(!filter.is_in_shopping_cart);
    }

    #[test]
    fn test_empty_tags_are_supplied() {
        assert_eq!(parse("tags=").tags, Some(BTreeSet::new()));
        assert_eq!(parse("").tags, None);
        assert_eq!(parse("").pagination, Pagination::default());
    }

    #[test]
    fn test_boolean_spellings() {
        assert!(parse("is_in_shopping_cart=true").is_in_shopping_cart);
        assert!(!parse("is_in_shopping_cart=0").is_in_shopping_cart);
        assert!(!parse("is_in_shopping_cart=false").is_in_shopping_cart);
    }
}
