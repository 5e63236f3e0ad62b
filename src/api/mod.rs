//! API Module
//!
//! HTTP handlers and routing for the menu REST API.
//!
//! # Endpoints (under `/api/v1`)
//! - `POST|GET /menus` - create or list menus
//! - `GET|PATCH|DELETE /menus/:menu_id` - one menu, with counts
//! - `POST|GET /menus/:menu_id/submenus` - create or list submenus
//! - `GET|PATCH|DELETE /menus/:menu_id/submenus/:submenu_id`
//! - `POST|GET /menus/:menu_id/submenus/:submenu_id/dishes`
//! - `GET|PATCH|DELETE /menus/:menu_id/submenus/:submenu_id/dishes/:dish_id`

pub mod cache_layer;
pub mod dishes;
pub mod handlers;
pub mod menus;
pub mod routes;
pub mod submenus;

pub use handlers::{health_handler, AppState};
pub use routes::create_router;
