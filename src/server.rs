use axum::{Router, routing::get};
use foodgram_recipe::{Command, Query};
use tower_http::trace::TraceLayer;
use url::Url;

use crate::{config::Config, routes};

/// Shared handler state: one request-scoped [`foodgram_shared::State`]
/// handle plus the read and write sides of the catalog built on it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: foodgram_shared::State,
    pub query: Query,
    pub command: Command,
    pub public_url: Url,
}

impl AppState {
    pub fn new(config: Config, db: foodgram_shared::State) -> anyhow::Result<Self> {
        let public_url = Url::parse(&config.server.public_url)?;

        Ok(Self {
            query: Query::new(db.clone(), config.media.url.to_owned()),
            command: Command::new(db.clone()),
            config,
            db,
            public_url,
        })
    }

    /// Absolute URL of the current request, as seen by clients.
    pub fn request_url(&self, uri: &axum::http::Uri) -> Url {
        let mut url = self.public_url.clone();
        url.set_path(uri.path());
        url.set_query(uri.query());
        url
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/ready", get(routes::health::ready))
        .nest("/api", routes::api())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, host: String, port: u16) -> anyhow::Result<()> {
    let read_db =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections).await?;
    let write_db = crate::db::create_write_pool(&config.database.url).await?;

    let state = AppState::new(config, foodgram_shared::State { read_db, write_db })?;
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
