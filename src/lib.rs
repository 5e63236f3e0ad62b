//! Menu Service - a restaurant menu REST API
//!
//! Menus own submenus, submenus own dishes. Deletes cascade down the
//! hierarchy, reads report child counts, and in production mode GET
//! responses are cached for a fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
