//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::models::{
    CountResponse, DeleteResponse, ExistsResponse, FlushResponse, GetResponse, HealthResponse,
    MaxMemoryRequest, MaxMemoryResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache store wrapped in Arc<RwLock<>> for thread-safe access.
/// The server caches arbitrary JSON values.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore<serde_json::Value>>>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore<serde_json::Value>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured memory budget does not parse, so a
    /// misconfigured server refuses to start instead of running with a
    /// silently substituted budget.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let cache = CacheStore::with_max_memory(&config.max_memory)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with the requested TTL. Responds
/// with 503 when the value does not fit in the memory budget.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    // Acquire write lock and set the value
    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, Duration::from_secs(req.ttl))?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Acquire write lock (the expired path deletes as a side effect)
    let mut cache = state.cache.write().await;
    let value = cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache. Responds with 404 if the key is absent.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    // Acquire write lock
    let mut cache = state.cache.write().await;
    if !cache.delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /exists/:key
///
/// Reports whether a live entry holds the key.
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ExistsResponse> {
    // Liveness check does not mutate, so the read lock suffices
    let cache = state.cache.read().await;
    let exists = cache.exists(&key);

    Json(ExistsResponse::new(key, exists))
}

/// Handler for POST /flush
///
/// Removes every entry from the cache.
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let mut cache = state.cache.write().await;
    cache.flush();

    Json(FlushResponse::new())
}

/// Handler for GET /count
///
/// Returns the raw number of resident entries.
pub async fn count_handler(State(state): State<AppState>) -> Json<CountResponse> {
    let cache = state.cache.read().await;

    Json(CountResponse::new(cache.len()))
}

/// Handler for PUT /config/max-memory
///
/// Reconfigures the memory budget from a size spec like "10MB". A
/// malformed spec is a 400 and leaves the previous budget in place.
pub async fn max_memory_handler(
    State(state): State<AppState>,
    Json(req): Json<MaxMemoryRequest>,
) -> Result<Json<MaxMemoryResponse>> {
    let mut cache = state.cache.write().await;
    cache.set_max_memory(&req.max_memory)?;

    Ok(Json(MaxMemoryResponse::new(
        cache.max_memory_label(),
        cache.max_bytes(),
    )))
}

/// Handler for GET /stats
///
/// Returns current cache statistics and memory accounting.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse {
        hits: stats.hits,
        misses: stats.misses,
        rejections: stats.rejections,
        expired_removals: stats.expired_removals,
        total_entries: stats.total_entries,
        current_bytes: cache.current_bytes(),
        max_bytes: cache.max_bytes(),
        max_memory: cache.max_memory_label().to_string(),
        hit_rate: stats.hit_rate(),
    })
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
