//! Menu queries

use sqlx::{SqliteConnection, SqlitePool};

use super::aggregates::{menu_counts, MENU_DISHES_COUNT, MENU_SUBMENUS_COUNT};
use super::begin_write;
use super::validation::{find_menu, menu_exists};
use super::MenuWithCounts;
use crate::error::Result;
use crate::models::{ListParams, MenuCreate, MenuUpdate};

async fn with_counts(conn: &mut SqliteConnection, menu_id: i64) -> Result<MenuWithCounts> {
    let menu = menu_exists(&mut *conn, menu_id).await?;
    let counts = menu_counts(conn, menu_id).await?;
    Ok(MenuWithCounts {
        id: menu.id,
        title: menu.title,
        description: menu.description,
        submenus_count: counts.submenus_count,
        dishes_count: counts.dishes_count,
    })
}

pub async fn create(db: &SqlitePool, item: &MenuCreate) -> Result<MenuWithCounts> {
    let mut tx = begin_write(db).await?;

    let id = sqlx::query("INSERT INTO menus (title, description) VALUES (?, ?)")
        .bind(&item.title)
        .bind(&item.description)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    let menu = with_counts(&mut tx, id).await?;

    tx.commit().await?;
    Ok(menu)
}

pub async fn get(db: &SqlitePool, menu_id: i64) -> Result<MenuWithCounts> {
    let mut conn = db.acquire().await?;
    with_counts(&mut conn, menu_id).await
}

/// One page of menus whose title contains `params.search`, oldest first.
pub async fn list(db: &SqlitePool, params: &ListParams) -> Result<Vec<MenuWithCounts>> {
    let sql = format!(
        "SELECT m.id, m.title, m.description, {}, {} FROM menus m \
         WHERE instr(m.title, ?) > 0 ORDER BY m.id LIMIT ? OFFSET ?",
        MENU_SUBMENUS_COUNT, MENU_DISHES_COUNT
    );
    let menus = sqlx::query_as::<_, MenuWithCounts>(&sql)
        .bind(&params.search)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await?;
    Ok(menus)
}

pub async fn update(db: &SqlitePool, menu_id: i64, item: &MenuUpdate) -> Result<MenuWithCounts> {
    let mut tx = begin_write(db).await?;
    menu_exists(&mut tx, menu_id).await?;

    sqlx::query(
        "UPDATE menus SET title = COALESCE(?, title), description = COALESCE(?, description) WHERE id = ?",
    )
    .bind(&item.title)
    .bind(&item.description)
    .bind(menu_id)
    .execute(&mut *tx)
    .await?;
    let menu = with_counts(&mut tx, menu_id).await?;

    tx.commit().await?;
    Ok(menu)
}

/// Deletes the menu with all submenus and dishes under it.
///
/// Returns whether a row was removed; a missing menu is not an error.
pub async fn delete(db: &SqlitePool, menu_id: i64) -> Result<bool> {
    let mut tx = begin_write(db).await?;
    if find_menu(&mut tx, menu_id).await?.is_none() {
        return Ok(false);
    }

    let removed = sqlx::query("DELETE FROM menus WHERE id = ?")
        .bind(menu_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::error::{ApiError, Entity};

    fn menu(title: &str) -> MenuCreate {
        MenuCreate {
            title: title.to_string(),
            description: format!("{} description", title),
        }
    }

    fn search(term: &str) -> ListParams {
        ListParams {
            search: term.to_string(),
            ..ListParams::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_pool().await;

        let created = create(&db, &menu("Breakfast")).await.unwrap();
        assert_eq!(created.submenus_count, 0);
        assert_eq!(created.dishes_count, 0);

        let fetched = get(&db, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.description, "Breakfast description");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = test_pool().await;
        assert!(matches!(get(&db, 1).await, Err(ApiError::NotFound(Entity::Menu))));
    }

    #[tokio::test]
    async fn test_duplicate_title_is_database_error() {
        let db = test_pool().await;
        create(&db, &menu("Lunch")).await.unwrap();
        assert!(matches!(create(&db, &menu("Lunch")).await, Err(ApiError::Database(_))));
    }

    #[tokio::test]
    async fn test_list_pages_in_creation_order() {
        let db = test_pool().await;
        for i in 1..=5 {
            create(&db, &menu(&format!("Menu {}", i))).await.unwrap();
        }

        let first = list(&db, &ListParams { page: 1, limit: 2, search: String::new() })
            .await
            .unwrap();
        let third = list(&db, &ListParams { page: 3, limit: 2, search: String::new() })
            .await
            .unwrap();

        let titles: Vec<_> = first.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Menu 1", "Menu 2"]);
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].title, "Menu 5");
    }

    #[tokio::test]
    async fn test_list_search_is_substring_match() {
        let db = test_pool().await;
        create(&db, &menu("Summer drinks")).await.unwrap();
        create(&db, &menu("Winter soups")).await.unwrap();
        create(&db, &menu("Summer salads")).await.unwrap();

        let found = list(&db, &search("Summer")).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.title.contains("Summer")));

        assert_eq!(list(&db, &search("soup")).await.unwrap().len(), 1);
        assert_eq!(list(&db, &search("")).await.unwrap().len(), 3);
        assert!(list(&db, &search("%")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = test_pool().await;
        let created = create(&db, &menu("Dinner")).await.unwrap();

        let patch = MenuUpdate {
            description: Some("Late".to_string()),
            ..MenuUpdate::default()
        };
        let updated = update(&db, created.id, &patch).await.unwrap();
        assert_eq!(updated.title, "Dinner");
        assert_eq!(updated.description, "Late");

        let missing = update(&db, created.id + 1, &patch).await;
        assert!(matches!(missing, Err(ApiError::NotFound(Entity::Menu))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_pool().await;
        let created = create(&db, &menu("Brunch")).await.unwrap();

        assert!(delete(&db, created.id).await.unwrap());
        assert!(!delete(&db, created.id).await.unwrap());
        assert!(get(&db, created.id).await.is_err());
    }
}
