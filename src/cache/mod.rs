//! Cache Module
//!
//! In-process response cache with a fixed TTL.

mod entry;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::ResponseCache;

/// Cache handle shared by the middleware and the purge task
pub type SharedCache = Arc<RwLock<ResponseCache>>;

// == Public Constants ==
/// Largest response body that will be cached
pub const MAX_BODY_SIZE: usize = 1024 * 1024; // 1 MB
