pub mod health;
mod ingredients;
mod recipes;
mod tags;
mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn api() -> Router<AppState> {
    Router::new()
        .route("/recipes/", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/download_shopping_cart/",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/recipes/{id}/",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/recipes/{id}/favorite/",
            post(recipes::add_favorite).delete(recipes::remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart/",
            post(recipes::add_to_cart).delete(recipes::remove_from_cart),
        )
        .route("/tags/", get(tags::list))
        .route("/tags/{id}/", get(tags::detail))
        .route("/ingredients/", get(ingredients::list))
        .route("/ingredients/{id}/", get(ingredients::detail))
        .route("/users/subscriptions/", get(users::subscriptions))
        .route(
            "/users/{id}/subscribe/",
            post(users::subscribe).delete(users::unsubscribe),
        )
}
