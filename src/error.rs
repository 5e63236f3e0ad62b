//! Error types for the menu service
//!
//! Provides unified error handling using thiserror.

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Entity ==
/// The three levels of the menu hierarchy, used to name what was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Menu,
    SubMenu,
    Dish,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Menu => "menu",
            Entity::SubMenu => "submenu",
            Entity::Dish => "dish",
        })
    }
}

// == API Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum ApiError {
    /// An entity on the requested path does not exist
    #[error("{0} not found")]
    NotFound(Entity),

    /// Request body failed validation
    #[error("{0}")]
    InvalidRequest(String),

    /// Request body is not JSON of the expected shape
    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),

    /// Any failure of the relational store, including constraint violations
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::InvalidRequest(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ApiError::MalformedBody(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::Database(err) => {
                error!("Database failure: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(detail))).into_response()
    }
}

// == Cache Error Enum ==
/// Failures of the response cache. These never reach clients: a response
/// that cannot be cached is simply served uncached.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// Cache holds `max_entries` live responses and admits no new keys
    #[error("Cache full: {0} entries")]
    CacheFull(usize),

    /// Response body exceeds the per-entry size limit
    #[error("Response of {0} bytes is too large to cache")]
    TooLarge(usize),
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::Menu.to_string(), "menu");
        assert_eq!(Entity::SubMenu.to_string(), "submenu");
        assert_eq!(Entity::Dish.to_string(), "dish");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = ApiError::NotFound(Entity::SubMenu).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "submenu not found");
    }

    #[tokio::test]
    async fn test_invalid_request_response() {
        let response = ApiError::InvalidRequest("Title cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "Title cannot be empty");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = ApiError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "Internal server error");
    }
}
