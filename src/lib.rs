//! membound - A lightweight in-memory cache
//!
//! Provides key-value caching with per-entry TTL expiration and a soft
//! total-memory budget, plus a small HTTP server surface on top.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod size;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheStore;
pub use config::Config;
pub use error::{CacheError, Result};
pub use size::{parse_size, EntrySize};
pub use tasks::{spawn_sweeper, SweeperHandle};
