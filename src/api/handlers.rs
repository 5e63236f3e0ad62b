//! Shared application state and service-level handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{ResponseCache, SharedCache};
use crate::config::Config;
use crate::db;
use crate::models::HealthResponse;

/// Application state shared across all handlers.
///
/// `cache` is `None` unless the configuration enables caching; the router
/// only composes the cache layer when it is present.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool of the relational store
    pub db: SqlitePool,
    /// Response cache, production mode only
    pub cache: Option<SharedCache>,
}

impl AppState {
    pub fn new(db: SqlitePool, cache: Option<ResponseCache>) -> Self {
        Self {
            db,
            cache: cache.map(|cache| Arc::new(RwLock::new(cache))),
        }
    }

    /// Connects the database and builds the cache the configuration asks for.
    pub async fn from_config(config: &Config) -> Result<Self, sqlx::Error> {
        let db = db::connect(config).await?;

        let cache = if config.mode.caching_enabled() {
            info!(
                "Response caching enabled: ttl={}s, max_entries={}",
                config.cache_ttl, config.cache_max_entries
            );
            Some(ResponseCache::new(config.cache_max_entries, config.cache_ttl()))
        } else {
            info!("Response caching disabled ({:?} mode)", config.mode);
            None
        };

        Ok(Self::new(db, cache))
    }
}

/// Handler for GET /health
///
/// Reports database reachability and, when enabled, cache statistics.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = db::ping(&state.db).await;
    let cache = match &state.cache {
        Some(cache) => Some(cache.read().await.stats()),
        None => None,
    };

    Json(HealthResponse::new(database, cache))
}
