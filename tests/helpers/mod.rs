#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use foodgram::{
    AppState,
    config::{Config, DatabaseConfig, JwtConfig, MediaConfig, ObservabilityConfig, ServerConfig},
    users::{NewUser, create_user},
};
use foodgram_recipe::ledger::{self, NewIngredient, NewTag};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

pub fn test_config(path: &PathBuf) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            public_url: "http://testserver".to_string(),
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", path.display()),
            max_connections: 2,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            issuer: "foodgram".to_string(),
            audience: "foodgram-api".to_string(),
            expiration_days: 1,
        },
        media: MediaConfig {
            url: "http://testserver/media".to_string(),
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app(path: PathBuf) -> anyhow::Result<TestApp> {
    let config = test_config(&path);
    foodgram::migrate::migrate(&config.database.url).await?;

    let read_db = foodgram::create_read_pool(&config.database.url, 2).await?;
    let write_db = foodgram::create_write_pool(&config.database.url).await?;
    let state = AppState::new(config, foodgram_shared::State { read_db, write_db })?;

    Ok(TestApp {
        router: foodgram::router(state.clone()),
        state,
    })
}

impl TestApp {
    pub async fn user(&self, username: &str) -> anyhow::Result<(i64, String)> {
        let id = create_user(
            &self.state.db.write_db,
            NewUser {
                email: format!("{username}@foodgram.test"),
                username: username.to_owned(),
                first_name: username.to_owned(),
                last_name: "Doe".to_owned(),
            },
        )
        .await?;
        let token = foodgram::auth::generate_token(&self.state.config.jwt, id)?;

        Ok((id, token))
    }

    pub async fn tag(&self, slug: &str, color: &str) -> anyhow::Result<i64> {
        let tag = ledger::create_tag(
            &self.state.db.write_db,
            NewTag {
                name: slug.to_owned(),
                color: color.to_owned(),
                slug: slug.to_owned(),
            },
        )
        .await?;

        Ok(tag.id)
    }

    pub async fn ingredient(&self, name: &str, unit: &str) -> anyhow::Result<i64> {
        let ingredient = ledger::create_ingredient(
            &self.state.db.write_db,
            NewIngredient {
                name: name.to_owned(),
                measurement_unit: unit.to_owned(),
            },
        )
        .await?;

        Ok(ingredient.id)
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Vec<u8>)> {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Token {token}"));
        }

        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => request.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();

        Ok((status, bytes.to_vec()))
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let (status, bytes) = self.send(method, uri, token, body).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, value))
    }
}
