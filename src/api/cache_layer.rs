//! Response caching middleware
//!
//! Composed onto the `/api/v1` routes only when caching is enabled. GET
//! responses with status 200 are stored under `"GET <path>?<query>"` for the
//! cache TTL. Writes do not invalidate anything, so reads may be stale for up
//! to one TTL.

use axum::{
    body::{to_bytes, Body},
    extract::{OriginalUri, Request, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, SharedCache};

/// Set on every response passing through the layer: `HIT` or `MISS`
pub const X_CACHE: &str = "x-cache";

/// Builds the key a request is cached under.
pub fn cache_key(method: &Method, uri: &Uri) -> String {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("{} {}", method, target)
}

pub async fn cache_responses(
    State(cache): State<SharedCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    // Nested routers see a stripped path; key on what the client sent
    let uri = match request.extensions().get::<OriginalUri>() {
        Some(OriginalUri(uri)) => uri.clone(),
        None => request.uri().clone(),
    };
    let key = cache_key(request.method(), &uri);

    // Exclusive: a lookup bumps the hit/miss counters and drops an expired entry
    let cached = cache.write().await.get(&key);
    if let Some(entry) = cached {
        debug!("Cache hit: {}", key);
        return hit_response(entry);
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to buffer response for {}: {}", key, err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            if let Err(err) = cache.write().await.insert(key.clone(), text.to_owned()) {
                warn!("Response for {} served uncached: {}", key, err);
            }
        }
        Err(_) => debug!("Response for {} is not UTF-8, not cached", key),
    }

    parts.headers.insert(X_CACHE, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

fn hit_response(entry: CacheEntry) -> Response {
    let age = entry.age().as_secs();
    let max_age = entry.ttl_remaining().as_secs();
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        entry.body,
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(X_CACHE, HeaderValue::from_static("HIT"));
    headers.insert(header::AGE, HeaderValue::from(age));
    if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", max_age)) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    response
}
