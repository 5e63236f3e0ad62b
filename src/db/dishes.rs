//! Dish queries

use sqlx::SqlitePool;

use super::begin_write;
use super::validation::{dish_exists, find_dish, submenu_exists};
use super::DishRecord;
use crate::error::Result;
use crate::models::{DishCreate, DishUpdate, ListParams};

pub async fn create(
    db: &SqlitePool,
    menu_id: i64,
    submenu_id: i64,
    item: &DishCreate,
) -> Result<DishRecord> {
    let mut tx = begin_write(db).await?;
    submenu_exists(&mut tx, menu_id, submenu_id).await?;

    let id = sqlx::query(
        "INSERT INTO dishes (submenu_id, title, description, price_cents) VALUES (?, ?, ?, ?)",
    )
    .bind(submenu_id)
    .bind(&item.title)
    .bind(&item.description)
    .bind(item.price.cents())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();
    let dish = dish_exists(&mut tx, menu_id, submenu_id, id).await?;

    tx.commit().await?;
    Ok(dish)
}

pub async fn get(db: &SqlitePool, menu_id: i64, submenu_id: i64, dish_id: i64) -> Result<DishRecord> {
    let mut conn = db.acquire().await?;
    dish_exists(&mut conn, menu_id, submenu_id, dish_id).await
}

/// One page of the submenu's dishes whose title contains `params.search`.
pub async fn list(
    db: &SqlitePool,
    menu_id: i64,
    submenu_id: i64,
    params: &ListParams,
) -> Result<Vec<DishRecord>> {
    let mut conn = db.acquire().await?;
    submenu_exists(&mut conn, menu_id, submenu_id).await?;

    let dishes = sqlx::query_as::<_, DishRecord>(
        "SELECT id, submenu_id, title, description, price_cents FROM dishes \
         WHERE submenu_id = ? AND instr(title, ?) > 0 ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(submenu_id)
    .bind(&params.search)
    .bind(params.limit())
    .bind(params.offset())
    .fetch_all(&mut *conn)
    .await?;
    Ok(dishes)
}

pub async fn update(
    db: &SqlitePool,
    menu_id: i64,
    submenu_id: i64,
    dish_id: i64,
    item: &DishUpdate,
) -> Result<DishRecord> {
    let mut tx = begin_write(db).await?;
    dish_exists(&mut tx, menu_id, submenu_id, dish_id).await?;

    sqlx::query(
        "UPDATE dishes SET title = COALESCE(?, title), description = COALESCE(?, description), \
         price_cents = COALESCE(?, price_cents) WHERE id = ?",
    )
    .bind(&item.title)
    .bind(&item.description)
    .bind(item.price.map(|p| p.cents()))
    .bind(dish_id)
    .execute(&mut *tx)
    .await?;
    let dish = dish_exists(&mut tx, menu_id, submenu_id, dish_id).await?;

    tx.commit().await?;
    Ok(dish)
}

/// A missing dish under an existing submenu is a no-op and yields `false`.
pub async fn delete(db: &SqlitePool, menu_id: i64, submenu_id: i64, dish_id: i64) -> Result<bool> {
    let mut tx = begin_write(db).await?;
    if find_dish(&mut tx, menu_id, submenu_id, dish_id).await?.is_none() {
        return Ok(false);
    }

    let removed = sqlx::query("DELETE FROM dishes WHERE id = ?")
        .bind(dish_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(removed > 0)
}
