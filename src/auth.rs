//! Identity adapter: turns an `Authorization` header into a [`Viewer`].
//!
//! Credentials are issued elsewhere; this side only checks the JWT
//! signature, issuer and audience, then trusts `sub` as the user id.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use foodgram_shared::Viewer;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::AppError, server::AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
}

pub fn generate_token(config: &JwtConfig, user_id: i64) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let lifetime = u64::try_from(config.expiration_days)? * 24 * 60 * 60;
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + lifetime,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: user_id.to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn decode_token(config: &JwtConfig, token: &str) -> Result<i64, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|err| {
        tracing::debug!(err = %err, "rejected token");
        AppError::Unauthorized
    })?;

    data.claims.sub.parse().map_err(|_| AppError::Unauthorized)
}

/// Bearer value of the `Authorization` header; both `Token` and `Bearer`
/// schemes are accepted.
fn bearer(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AppError::Unauthorized)?;
    let token = value
        .strip_prefix("Token ")
        .or_else(|| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?;

    Ok(Some(token))
}

/// Whoever is calling; anonymous when no credentials are sent.
pub struct CurrentViewer(pub Viewer);

impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer(parts)? else {
            return Ok(CurrentViewer(Viewer::Anonymous));
        };

        let id = decode_token(&state.config.jwt, token)?;

        Ok(CurrentViewer(Viewer::User(id)))
    }
}

/// Authenticated user id; anonymous callers are rejected with 401.
pub struct RequireUser(pub i64);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentViewer(viewer) = CurrentViewer::from_request_parts(parts, state).await?;

        viewer.id().map(RequireUser).ok_or(AppError::Unauthorized)
    }
}
