mod applications;
mod config;
mod db;
mod errors;
mod jobs;
mod matching;
mod models;
mod profile;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::scorer::KeywordMatchScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobtrack API v{}", env!("CARGO_PKG_VERSION"));

    // Postgres when configured, otherwise everything lives in memory
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set; using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    let scorer = Arc::new(KeywordMatchScorer);
    let state = AppState::new(store, scorer);
    info!("Match scorer initialized (backend: {})", state.scorer.backend());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
