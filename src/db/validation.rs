//! Ancestor-chain validation
//!
//! Checks walk the hierarchy top-down and stop at the first missing link,
//! so the error always names the shallowest absent entity. A submenu is only
//! reachable through the menu that owns it, and a dish only through its own
//! submenu.

use sqlx::SqliteConnection;

use super::{DishRecord, MenuRecord, SubMenuRecord};
use crate::error::{ApiError, Entity, Result};

pub async fn find_menu(conn: &mut SqliteConnection, menu_id: i64) -> Result<Option<MenuRecord>> {
    let menu = sqlx::query_as::<_, MenuRecord>(
        "SELECT id, title, description FROM menus WHERE id = ?",
    )
    .bind(menu_id)
    .fetch_optional(conn)
    .await?;
    Ok(menu)
}

/// Returns the menu or `menu not found`.
pub async fn menu_exists(conn: &mut SqliteConnection, menu_id: i64) -> Result<MenuRecord> {
    find_menu(conn, menu_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Menu))
}

/// Fails on a missing menu; `None` means only the submenu itself is absent.
pub async fn find_submenu(
    conn: &mut SqliteConnection,
    menu_id: i64,
    submenu_id: i64,
) -> Result<Option<SubMenuRecord>> {
    menu_exists(&mut *conn, menu_id).await?;

    let submenu = sqlx::query_as::<_, SubMenuRecord>(
        "SELECT id, menu_id, title, description FROM submenus WHERE id = ? AND menu_id = ?",
    )
    .bind(submenu_id)
    .bind(menu_id)
    .fetch_optional(conn)
    .await?;
    Ok(submenu)
}

pub async fn submenu_exists(
    conn: &mut SqliteConnection,
    menu_id: i64,
    submenu_id: i64,
) -> Result<SubMenuRecord> {
    find_submenu(conn, menu_id, submenu_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::SubMenu))
}

/// Fails on a missing menu or submenu; `None` means only the dish is absent.
pub async fn find_dish(
    conn: &mut SqliteConnection,
    menu_id: i64,
    submenu_id: i64,
    dish_id: i64,
) -> Result<Option<DishRecord>> {
    submenu_exists(&mut *conn, menu_id, submenu_id).await?;

    let dish = sqlx::query_as::<_, DishRecord>(
        "SELECT id, submenu_id, title, description, price_cents FROM dishes WHERE id = ? AND submenu_id = ?",
    )
    .bind(dish_id)
    .bind(submenu_id)
    .fetch_optional(conn)
    .await?;
    Ok(dish)
}

pub async fn dish_exists(
    conn: &mut SqliteConnection,
    menu_id: i64,
    submenu_id: i64,
    dish_id: i64,
) -> Result<DishRecord> {
    find_dish(conn, menu_id, submenu_id, dish_id)
        .await?
        .ok_or(ApiError::NotFound(Entity::Dish))
}
