mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod models;
mod resumes;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::config::{Config, StorageBackend};
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let tokens = TokenIssuer::new(
        &config.jwt_secret,
        config.jwt_algorithm,
        config.access_token_ttl,
    );
    info!(
        "Token issuer ready ({:?}, ttl {} min)",
        config.jwt_algorithm,
        config.access_token_ttl.num_minutes()
    );

    let hasher = PasswordHasher::new(config.bcrypt_cost);

    let state = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            ensure_schema(&pool).await?;
            let store = Arc::new(PgStore::new(pool));
            AppState {
                users: store.clone(),
                resumes: store,
                tokens,
                hasher,
            }
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; all data is lost on shutdown");
            AppState::in_memory(tokens, hasher)
        }
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a frontend domain exists

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
