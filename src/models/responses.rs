//! Response DTOs for the menu API
//!
//! Defines the structure of outgoing HTTP response bodies. Identifiers are
//! rendered as strings.

use serde::Serialize;

use super::Price;
use crate::cache::CacheStats;
use crate::db::{DishRecord, MenuWithCounts, SubMenuWithCounts};
use crate::error::Entity;

/// Menu with its read-time aggregates
#[derive(Debug, Clone, Serialize)]
pub struct MenuResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub submenus_count: i64,
    pub dishes_count: i64,
}

impl From<MenuWithCounts> for MenuResponse {
    fn from(menu: MenuWithCounts) -> Self {
        Self {
            id: menu.id.to_string(),
            title: menu.title,
            description: menu.description,
            submenus_count: menu.submenus_count,
            dishes_count: menu.dishes_count,
        }
    }
}

/// Submenu with its read-time dish count
#[derive(Debug, Clone, Serialize)]
pub struct SubMenuResponse {
    pub id: String,
    pub menu_id: String,
    pub title: String,
    pub description: String,
    pub dishes_count: i64,
}

impl From<SubMenuWithCounts> for SubMenuResponse {
    fn from(submenu: SubMenuWithCounts) -> Self {
        Self {
            id: submenu.id.to_string(),
            menu_id: submenu.menu_id.to_string(),
            title: submenu.title,
            description: submenu.description,
            dishes_count: submenu.dishes_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DishResponse {
    pub id: String,
    pub submenu_id: String,
    pub title: String,
    pub description: String,
    pub price: Price,
}

impl From<DishRecord> for DishResponse {
    fn from(dish: DishRecord) -> Self {
        Self {
            id: dish.id.to_string(),
            submenu_id: dish.submenu_id.to_string(),
            title: dish.title,
            description: dish.description,
            price: Price::from_cents(dish.price_cents),
        }
    }
}

/// Response body for every DELETE endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub status: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(entity: Entity) -> Self {
        Self {
            status: true,
            message: format!("The {} has been deleted", entity),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the database answers, "degraded" otherwise
    pub status: String,
    pub database: bool,
    /// Present only when response caching is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn new(database: bool, cache: Option<CacheStats>) -> Self {
        let status = if database { "healthy" } else { "degraded" };
        Self {
            status: status.to_string(),
            database,
            cache,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
