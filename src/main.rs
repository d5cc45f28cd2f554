mod catalog;
mod config;
mod error;
mod index;
mod mapper;
mod models;
mod query;
mod routes;
mod templates;
mod tmdb;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, index::IndexClient, tmdb::TmdbClient};

pub struct AppState {
    pub config: Arc<Config>,
    pub tmdb: TmdbClient,
    pub index: IndexClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,cinedex=debug".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("cinedex/0.1")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let tmdb = TmdbClient::new(
        http.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );
    let index = IndexClient::new(http, config.index_url.clone(), config.index_name.clone());

    let state = Arc::new(AppState { config: config.clone(), tmdb, index });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/search", get(routes::search))
        .route("/movies", post(routes::add_movie))
        .route("/movies/{external_id}", get(routes::movie_detail))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
