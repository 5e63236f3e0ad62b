//! Cache Entry Module
//!
//! A cached response body with its fixed expiry instant.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A serialized response body and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// JSON body exactly as the handler produced it
    pub body: String,
    /// When the entry was stored
    pub created_at: Instant,
    /// When the entry expires
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(body: String, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            body,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry instant,
    /// so a zero TTL is never served.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// How long the entry has been cached.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
