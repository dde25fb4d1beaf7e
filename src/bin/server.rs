//! Camps API server: connects to PostgreSQL, ensures tables exist, optionally seeds sample data, and serves the API.

use camp_api::{
    app_router, ensure_database_exists, ensure_tables, seed_if_empty, AppState, PgCampRepository, ServerConfig,
    SettingsHandle,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("camp_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    ensure_tables(&pool, &config.db_schema).await?;
    if config.seed_data && seed_if_empty(&pool, &config.db_schema).await? {
        tracing::info!("sample camp data inserted");
    }

    let settings = SettingsHandle::from_file(&config.settings_path).await?;
    let repository = PgCampRepository::new(pool, config.db_schema.clone());
    let state = AppState::new(Arc::new(repository), settings);
    let app = app_router(state, config.max_body_bytes);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
