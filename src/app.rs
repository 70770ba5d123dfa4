/*
 * Responsibility
 * - Config読み込み → 依存生成 (PgPool / IdCodec) → Router 組み立て
 * - Middleware の適用 (request-id / trace / CORS / security headers)
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    config::Config,
    middleware::{cors, http, security_headers},
    services::id_codec::IdCodec,
    state::AppState,
};

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = AppState::new(db, id_codec, config.upload_dir.clone());

    let app = build_router(state, &config);

    tracing::info!(addr = %config.addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = http::apply(router, config.max_upload_bytes);
    let router = cors::apply(router, config);
    security_headers::apply(router)
}
