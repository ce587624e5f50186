use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use foodgram_shared::Error;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] Error),

    #[error("authentication credentials were not provided or are invalid")]
    Unauthorized,

    /// Query string or body that could not be parsed at all.
    #[error("{0}")]
    Malformed(String),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Malformed(rejection.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Malformed(rejection.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Domain(err.into())
    }
}

impl AppError {
    pub fn kind(&self) -> &str {
        match self {
            AppError::Domain(err) => err.kind(),
            AppError::Unauthorized => "unauthorized",
            AppError::Malformed(_) => "malformed_request",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Malformed(_) => StatusCode::BAD_REQUEST,
            AppError::Domain(err) => match err {
                Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::AlreadyExists(_) => StatusCode::CONFLICT,
                Error::InvalidFilterCombination => StatusCode::BAD_REQUEST,
                Error::AggregationEmpty => StatusCode::NOT_FOUND,
                Error::Forbidden => StatusCode::FORBIDDEN,
                Error::Validate(_) | Error::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Domain(Error::Unknown(err)) => {
                tracing::error!(err = ?err, "unexpected error");
                json!({
                    "kind": self.kind(),
                    "detail": "An unexpected error occurred. Please try again later.",
                })
            }
            AppError::Domain(Error::Validate(errors)) => json!({
                "kind": self.kind(),
                "detail": "Invalid input.",
                "errors": errors,
            }),
            _ => json!({
                "kind": self.kind(),
                "detail": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(Error::NotFound("recipe")), StatusCode::NOT_FOUND),
            (AppError::from(Error::AlreadyExists("favorite")), StatusCode::CONFLICT),
            (AppError::from(Error::InvalidFilterCombination), StatusCode::BAD_REQUEST),
            (AppError::from(Error::AggregationEmpty), StatusCode::NOT_FOUND),
            (AppError::from(Error::Forbidden), StatusCode::FORBIDDEN),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::Malformed("page: invalid digit".to_owned()), StatusCode::BAD_REQUEST),
            (
                AppError::from(anyhow::anyhow!("disk on fire")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }

    #[test]
    fn test_storage_text_does_not_leak() {
        let response = AppError::from(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
