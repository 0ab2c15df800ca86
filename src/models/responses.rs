//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: serde_json::Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the EXISTS operation (GET /exists/:key)
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    /// The requested key
    pub key: String,
    /// Whether a live entry holds the key
    pub exists: bool,
}

impl ExistsResponse {
    /// Creates a new ExistsResponse
    pub fn new(key: impl Into<String>, exists: bool) -> Self {
        Self {
            key: key.into(),
            exists,
        }
    }
}

/// Response body for the FLUSH operation (POST /flush)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
}

impl FlushResponse {
    /// Creates a new FlushResponse
    pub fn new() -> Self {
        Self {
            message: "Cache flushed successfully".to_string(),
        }
    }
}

impl Default for FlushResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the key count endpoint (GET /count)
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// Raw number of resident entries, including not-yet-swept expired ones
    pub keys: usize,
}

impl CountResponse {
    /// Creates a new CountResponse
    pub fn new(keys: usize) -> Self {
        Self { keys }
    }
}

/// Response body for reconfiguring the budget (PUT /config/max-memory)
#[derive(Debug, Clone, Serialize)]
pub struct MaxMemoryResponse {
    /// Success message
    pub message: String,
    /// Canonical form of the accepted spec, e.g. "10MB"
    pub max_memory: String,
    /// The budget in bytes
    pub max_bytes: u64,
}

impl MaxMemoryResponse {
    /// Creates a new MaxMemoryResponse
    pub fn new(max_memory: impl Into<String>, max_bytes: u64) -> Self {
        let max_memory = max_memory.into();
        Self {
            message: format!("Memory budget set to {}", max_memory),
            max_memory,
            max_bytes,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of sets rejected by the memory budget
    pub rejections: u64,
    /// Number of entries removed after their TTL elapsed
    pub expired_removals: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Byte total of resident entries
    pub current_bytes: u64,
    /// Configured budget in bytes
    pub max_bytes: u64,
    /// Human-readable budget
    pub max_memory: String,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
