//! Submenu queries
//!
//! Every operation first resolves the owning menu, so a request under a
//! missing menu fails with `menu not found` before the submenu is looked at.

use sqlx::{SqliteConnection, SqlitePool};

use super::aggregates::{submenu_dishes_count, SUBMENU_DISHES_COUNT};
use super::begin_write;
use super::validation::{find_submenu, menu_exists, submenu_exists};
use super::SubMenuWithCounts;
use crate::error::Result;
use crate::models::{ListParams, SubMenuCreate, SubMenuUpdate};

async fn with_counts(
    conn: &mut SqliteConnection,
    menu_id: i64,
    submenu_id: i64,
) -> Result<SubMenuWithCounts> {
    let submenu = submenu_exists(&mut *conn, menu_id, submenu_id).await?;
    let dishes_count = submenu_dishes_count(conn, submenu_id).await?;
    Ok(SubMenuWithCounts {
        id: submenu.id,
        menu_id: submenu.menu_id,
        title: submenu.title,
        description: submenu.description,
        dishes_count,
    })
}

pub async fn create(
    db: &SqlitePool,
    menu_id: i64,
    item: &SubMenuCreate,
) -> Result<SubMenuWithCounts> {
    let mut tx = begin_write(db).await?;
    menu_exists(&mut tx, menu_id).await?;

    let id = sqlx::query("INSERT INTO submenus (menu_id, title, description) VALUES (?, ?, ?)")
        .bind(menu_id)
        .bind(&item.title)
        .bind(&item.description)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    let submenu = with_counts(&mut tx, menu_id, id).await?;

    tx.commit().await?;
    Ok(submenu)
}

pub async fn get(db: &SqlitePool, menu_id: i64, submenu_id: i64) -> Result<SubMenuWithCounts> {
    let mut conn = db.acquire().await?;
    with_counts(&mut conn, menu_id, submenu_id).await
}

/// One page of the menu's submenus whose title contains `params.search`.
pub async fn list(
    db: &SqlitePool,
    menu_id: i64,
    params: &ListParams,
) -> Result<Vec<SubMenuWithCounts>> {
    let mut conn = db.acquire().await?;
    menu_exists(&mut conn, menu_id).await?;

    let sql = format!(
        "SELECT s.id, s.menu_id, s.title, s.description, {} FROM submenus s \
         WHERE s.menu_id = ? AND instr(s.title, ?) > 0 ORDER BY s.id LIMIT ? OFFSET ?",
        SUBMENU_DISHES_COUNT
    );
    let submenus = sqlx::query_as::<_, SubMenuWithCounts>(&sql)
        .bind(menu_id)
        .bind(&params.search)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&mut *conn)
        .await?;
    Ok(submenus)
}

pub async fn update(
    db: &SqlitePool,
    menu_id: i64,
    submenu_id: i64,
    item: &SubMenuUpdate,
) -> Result<SubMenuWithCounts> {
    let mut tx = begin_write(db).await?;
    submenu_exists(&mut tx, menu_id, submenu_id).await?;

    sqlx::query(
        "UPDATE submenus SET title = COALESCE(?, title), description = COALESCE(?, description) WHERE id = ?",
    )
    .bind(&item.title)
    .bind(&item.description)
    .bind(submenu_id)
    .execute(&mut *tx)
    .await?;
    let submenu = with_counts(&mut tx, menu_id, submenu_id).await?;

    tx.commit().await?;
    Ok(submenu)
}

/// Deletes the submenu and its dishes. A missing submenu under an existing
/// menu is a no-op and yields `false`.
pub async fn delete(db: &SqlitePool, menu_id: i64, submenu_id: i64) -> Result<bool> {
    let mut tx = begin_write(db).await?;
    if find_submenu(&mut tx, menu_id, submenu_id).await?.is_none() {
        return Ok(false);
    }

    let removed = sqlx::query("DELETE FROM submenus WHERE id = ?")
        .bind(submenu_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(removed > 0)
}
