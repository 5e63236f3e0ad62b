//! Read-time aggregates
//!
//! Counts are never stored. They are evaluated as correlated subqueries in
//! the same SELECT that loads the parent rows, so a list page costs one query.

use sqlx::SqliteConnection;

/// Direct child submenus of the menu aliased `m`.
pub(crate) const MENU_SUBMENUS_COUNT: &str =
    "(SELECT COUNT(*) FROM submenus s WHERE s.menu_id = m.id) AS submenus_count";

/// Dishes across every submenu of the menu aliased `m`.
pub(crate) const MENU_DISHES_COUNT: &str = "(SELECT COUNT(*) FROM dishes d \
     JOIN submenus s ON d.submenu_id = s.id WHERE s.menu_id = m.id) AS dishes_count";

/// Direct child dishes of the submenu aliased `s`.
pub(crate) const SUBMENU_DISHES_COUNT: &str =
    "(SELECT COUNT(*) FROM dishes d WHERE d.submenu_id = s.id) AS dishes_count";

/// Counts under one menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::FromRow)]
pub struct MenuCounts {
    pub submenus_count: i64,
    pub dishes_count: i64,
}

pub async fn menu_counts(
    conn: &mut SqliteConnection,
    menu_id: i64,
) -> Result<MenuCounts, sqlx::Error> {
    let sql = format!(
        "SELECT {}, {} FROM menus m WHERE m.id = ?",
        MENU_SUBMENUS_COUNT, MENU_DISHES_COUNT
    );
    let counts = sqlx::query_as::<_, MenuCounts>(&sql)
        .bind(menu_id)
        .fetch_optional(conn)
        .await?;
    Ok(counts.unwrap_or_default())
}

pub async fn submenu_dishes_count(
    conn: &mut SqliteConnection,
    submenu_id: i64,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dishes WHERE submenu_id = ?")
        .bind(submenu_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}
