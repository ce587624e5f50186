use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::server::AppState;

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe, checks both pools
pub async fn ready(State(app): State<AppState>) -> impl IntoResponse {
    for pool in [&app.db.read_db, &app.db.write_db] {
        if let Err(e) = sqlx::query("SELECT 1").fetch_one(pool).await {
            tracing::error!("Readiness check failed: database unavailable - {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "reason": "database_unavailable"
                })),
            );
        }
    }

    (StatusCode::OK, Json(json!({"status": "ready"})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
